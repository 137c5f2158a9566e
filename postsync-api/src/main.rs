//! # PostSync API Server
//!
//! Imports users and their posts from a remote catalog into a local SQLite
//! database and exports stored posts as spreadsheets.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p postsync-api
//! REMOTE_SOURCE=mock DATABASE_URL=sqlite://postsync.db cargo run -p postsync-api
//! ```

use postsync_api::{
    app::{build_router, AppState},
    config::{Config, RemoteKind},
    telemetry,
};
use postsync_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool},
};
use postsync_shared::remote::{HttpRemoteSource, MockRemoteSource, RemoteSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    telemetry::init(config.logging.format);

    tracing::info!(
        "PostSync API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = create_pool(config.pool_config()).await?;
    run_migrations(&pool).await?;
    tracing::info!(database = %config.database.url, "Database ready");

    let remote: Arc<dyn RemoteSource> = match config.remote.kind {
        RemoteKind::Http => {
            let source = HttpRemoteSource::new(config.remote_config())?;
            tracing::info!(
                base_url = %source.config().base_url,
                timeout_secs = source.config().request_timeout.as_secs(),
                "Using HTTP remote source"
            );
            Arc::new(source)
        }
        RemoteKind::Mock => {
            tracing::warn!("Using built-in sample remote source");
            Arc::new(MockRemoteSource::sample())
        }
    };

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), remote, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, closing database pool...");
    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
