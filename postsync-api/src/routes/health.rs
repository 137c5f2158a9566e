/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - Database connectivity and schema state
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "schema_up_to_date": true
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use postsync_shared::db::{migrations::get_migration_status, pool::health_check as db_health_check};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Whether the schema has been applied
    pub schema_up_to_date: bool,
}

/// Health check handler
///
/// Reports `degraded` when the database does not answer or the schema is
/// missing. The remote catalog is not probed.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = db_health_check(&state.db).await.is_ok();

    let schema_up_to_date = if connected {
        get_migration_status(&state.db)
            .await
            .map(|status| status.is_up_to_date)
            .unwrap_or(false)
    } else {
        false
    };

    Ok(Json(HealthResponse {
        status: if connected && schema_up_to_date {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        schema_up_to_date,
    }))
}
