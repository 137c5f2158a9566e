/// HTTP client for the remote user/post catalog
///
/// Speaks the JSONPlaceholder REST layout:
///
/// ```text
/// GET {base}/users               -> [RemoteUser]
/// GET {base}/users/{id}          -> RemoteUser
/// GET {base}/posts?userId={id}   -> [RemotePost]
/// ```
///
/// Transport failures and non-2xx statuses become `SyncError::Remote`,
/// except a 404 on a single user which becomes `SyncError::NotFound`.
/// Bodies that do not decode become `SyncError::Parse`. Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::remote::{HttpRemoteSource, RemoteConfig, RemoteSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpRemoteSource::new(RemoteConfig::default())?;
/// let users = source.list_users().await?;
/// println!("{} remote users", users.len());
/// # Ok(())
/// # }
/// ```

use super::{RemotePost, RemoteSource, RemoteUser};
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Public JSONPlaceholder deployment
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Remote client configuration
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL without trailing slash
    pub base_url: String,

    /// Whole-request timeout
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// [`RemoteSource`] backed by reqwest
#[derive(Clone)]
pub struct HttpRemoteSource {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl HttpRemoteSource {
    /// Builds the HTTP client
    pub fn new(config: RemoteConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("postsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Client configuration
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> SyncResult<T> {
        let url = self.url(path);
        debug!(url = %url, "Fetching from remote source");

        let response = self.http.get(&url).query(query).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Remote request failed");
            SyncError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SyncError::NotFound(format!("GET {} returned 404", url)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, "Remote source returned an error status");
            return Err(SyncError::Remote(format!(
                "GET {} returned {}: {}",
                url, status, body
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| SyncError::Parse(format!("GET {}: {}", url, e)))
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn list_users(&self) -> SyncResult<Vec<RemoteUser>> {
        self.get_json("/users", &[]).await.map_err(not_found_is_remote)
    }

    async fn get_user(&self, id: i64) -> SyncResult<RemoteUser> {
        self.get_json(&format!("/users/{}", id), &[]).await
    }

    async fn list_posts_for_user(&self, id: i64) -> SyncResult<Vec<RemotePost>> {
        self.get_json("/posts", &[("userId", id.to_string())])
            .await
            .map_err(not_found_is_remote)
    }
}

// Only a single-user lookup can be "not found"; a 404 on a collection
// means the catalog itself is misconfigured.
fn not_found_is_remote(err: SyncError) -> SyncError {
    match err {
        SyncError::NotFound(msg) => SyncError::Remote(msg),
        other => other,
    }
}
