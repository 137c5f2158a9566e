/// User endpoints
///
/// - `GET /users` - Remote users with their local import state
/// - `POST /users` - Import a user by name and email
///
/// A UI shows "Add" for users with `already_imported: false` and "Open"
/// (the posts page) for the others. Importing an email twice answers
/// `409 Conflict`, which means the user is already imported.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use postsync_shared::{models::user::User, reconcile::AnnotatedUser};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Import request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ImportUserRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,

    /// Email address, the import identity
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Lists remote users annotated with import state
///
/// # Endpoint
///
/// ```text
/// GET /users
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "Leanne Graham",
///     "email": "Sincere@april.biz",
///     "phone": "1-770-736-8031 x56442",
///     "website": "hildegard.org",
///     "address": { "city": "Gwenborough" },
///     "company": { "name": "Romaguera-Crona" },
///     "already_imported": false
///   }
/// ]
/// ```
///
/// # Errors
///
/// - `502 Bad Gateway`: Remote catalog unavailable or malformed
/// - `500 Internal Server Error`: Store failure
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<AnnotatedUser>>> {
    let users = state.reconciler.annotate_users().await?;
    Ok(Json(users))
}

/// Imports a user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "name": "Leanne Graham", "email": "Sincere@april.biz" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored row. Only name and email are stored.
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a JSON object with `name` and `email`
/// - `409 Conflict`: Email already imported
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Store failure
pub async fn import_user(
    State(state): State<AppState>,
    payload: Result<Json<ImportUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    req.validate()?;

    let user = state.reconciler.import_user(&req.name, &req.email).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
