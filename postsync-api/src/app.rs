/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use postsync_api::{app::AppState, config::Config};
/// use postsync_shared::db::{migrations::run_migrations, pool::create_pool};
/// use postsync_shared::remote::MockRemoteSource;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// run_migrations(&pool).await?;
/// let state = AppState::new(pool, Arc::new(MockRemoteSource::sample()), config);
/// let app = postsync_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use postsync_shared::export::Exporter;
use postsync_shared::reconcile::Reconciler;
use postsync_shared::remote::RemoteSource;
use postsync_shared::store::{SqliteStore, Store};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every component holds the same store handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Import workflow
    pub reconciler: Reconciler,

    /// Spreadsheet export
    pub exporter: Exporter,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state over a migrated pool
    pub fn new(db: SqlitePool, remote: Arc<dyn RemoteSource>, config: Config) -> Self {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::new(db.clone()));
        let reconciler = Reconciler::new(store, remote);
        let exporter = Exporter::new(reconciler.store().clone());

        Self {
            db,
            reconciler,
            exporter,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                          # Health check
/// └── /users
///     ├── GET  /                            # Remote users with import state
///     ├── POST /                            # Import a user
///     └── /:user_id/posts
///         ├── GET  /                        # Remote posts with bulk-import state
///         ├── POST /bulk                    # Bulk import posts
///         └── GET  /export                  # Stored posts as XLSX
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let post_routes = Router::new()
        .route("/", get(routes::posts::list_posts))
        .route("/bulk", post(routes::posts::bulk_import_posts))
        .route("/export", get(routes::posts::export_posts));

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::import_user),
        )
        .nest("/:user_id/posts", post_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([header::CONTENT_DISPOSITION])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
