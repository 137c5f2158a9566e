/// Post endpoints
///
/// - `GET /users/:user_id/posts` - Remote posts with bulk-import state
/// - `POST /users/:user_id/posts/bulk` - Store the user's remote posts
/// - `GET /users/:user_id/posts/export` - Download stored posts as XLSX
///
/// `already_bulk_imported` tells a UI whether to offer "Bulk Add" or
/// "Download". It is advisory: both actions stay callable.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use postsync_shared::reconcile::{BulkImportReport, UserPosts};

/// Lists a user's remote posts with the bulk-import state
///
/// # Endpoint
///
/// ```text
/// GET /users/1/posts
/// ```
///
/// # Response
///
/// ```json
/// {
///   "user": { "id": 1, "name": "Leanne Graham", ... },
///   "already_bulk_imported": false,
///   "posts": [{ "userId": 1, "id": 1, "title": "...", "body": "..." }]
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Remote user unknown
/// - `502 Bad Gateway`: Remote catalog unavailable or malformed
pub async fn list_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserPosts>> {
    let posts = state.reconciler.annotate_posts_for_user(user_id).await?;
    Ok(Json(posts))
}

/// Bulk imports a user's remote posts
///
/// Not atomic. On a store failure the rows written so far are kept and the
/// endpoint answers 500.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "user_id": 1, "inserted": 10 }
/// ```
pub async fn bulk_import_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<(StatusCode, Json<BulkImportReport>)> {
    let report = state.reconciler.bulk_import_posts(user_id).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Downloads the stored posts of a user as a spreadsheet
///
/// Answers with an attachment named `posts_<user_id>.xlsx`. A user without
/// stored posts gets a header-only workbook.
pub async fn export_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Response> {
    let export = state.exporter.export_posts_as_spreadsheet(user_id).await?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(export.bytes),
    )
        .into_response())
}
