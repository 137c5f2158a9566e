/// Read-only access to the remote user/post catalog
///
/// The [`RemoteSource`] trait is the seam between the reconciler and the
/// network. Two implementations ship:
///
/// - **Http**: reqwest client for a JSONPlaceholder-compatible API
/// - **Mock**: fixed in-memory records for tests and offline runs
///
/// All queries are unpaged and addressed by remote user id.

pub mod client;
pub mod mock;
pub mod types;

pub use client::{HttpRemoteSource, RemoteConfig, DEFAULT_BASE_URL};
pub use mock::MockRemoteSource;
pub use types::{RemoteAddress, RemoteCompany, RemotePost, RemoteUser};

use crate::error::SyncResult;
use async_trait::async_trait;

/// Remote catalog of users and their posts
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Full remote user list, in catalog order
    async fn list_users(&self) -> SyncResult<Vec<RemoteUser>>;

    /// A single remote user; `NotFound` if the id is unknown
    async fn get_user(&self, id: i64) -> SyncResult<RemoteUser>;

    /// All remote posts for the user id, in catalog order
    async fn list_posts_for_user(&self, id: i64) -> SyncResult<Vec<RemotePost>>;
}
