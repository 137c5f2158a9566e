//! Common test utilities for API integration tests
//!
//! Every context gets its own in-memory database and an in-process remote
//! source, so tests never touch the network and can run in parallel.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use postsync_api::app::{build_router, AppState};
use postsync_api::config::{
    ApiConfig, Config, DatabaseConfig, LogFormat, LoggingConfig, RemoteKind, RemoteSettings,
};
use postsync_shared::db::migrations::run_migrations;
use postsync_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use postsync_shared::remote::{MockRemoteSource, RemoteSource};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Context backed by the sample remote catalog
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_remote(Arc::new(MockRemoteSource::sample())).await
    }

    /// Context backed by the given remote source
    pub async fn with_remote(remote: Arc<dyn RemoteSource>) -> anyhow::Result<Self> {
        let db = create_pool(PoolConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), remote, test_config());
        let app = build_router(state);

        Ok(Self { db, app })
    }

    /// Sends a request and returns status plus raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// GET returning status and JSON body
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send(get(uri)).await;
        (status, parse(&body))
    }

    /// POST with a JSON body returning status and JSON body
    pub async fn post_json(&self, uri: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse(&body))
    }

    /// POST without a body returning status and JSON body
    pub async fn post_empty(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse(&body))
    }
}

/// Configuration that never reads the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        remote: RemoteSettings {
            kind: RemoteKind::Mock,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
        logging: LoggingConfig {
            format: LogFormat::Pretty,
        },
    }
}

/// Builds a GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn parse(body: &[u8]) -> serde_json::Value {
    if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(body).unwrap_or(serde_json::Value::Null)
    }
}
