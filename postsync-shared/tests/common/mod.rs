//! Common test utilities for the shared crate's integration tests
//!
//! - Fresh in-memory stores
//! - A store wrapper that fails after a set number of post inserts
//! - Remote fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use postsync_shared::error::{SyncError, SyncResult};
use postsync_shared::models::{post::Post, user::User};
use postsync_shared::remote::mock::{post, user};
use postsync_shared::remote::{MockRemoteSource, RemotePost};
use postsync_shared::store::{SqliteStore, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fresh in-memory store with the schema applied
pub async fn memory_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::in_memory().await.expect("Failed to open store"))
}

/// Store that lets the first `allowed_posts` post inserts through and then
/// fails every further one with a store fault
pub struct FaultyStore {
    inner: Arc<SqliteStore>,
    allowed_posts: usize,
    attempted_posts: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: Arc<SqliteStore>, allowed_posts: usize) -> Self {
        Self {
            inner,
            allowed_posts,
            attempted_posts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Store for FaultyStore {
    async fn user_exists(&self, email: &str) -> SyncResult<bool> {
        self.inner.user_exists(email).await
    }

    async fn insert_user(&self, name: &str, email: &str) -> SyncResult<User> {
        self.inner.insert_user(name, email).await
    }

    async fn posts_exist_for_user(&self, user_id: i64) -> SyncResult<bool> {
        self.inner.posts_exist_for_user(user_id).await
    }

    async fn insert_post(&self, user_id: i64, title: &str, body: &str) -> SyncResult<Post> {
        let attempt = self.attempted_posts.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.allowed_posts {
            return Err(SyncError::Store("disk I/O error".to_string()));
        }
        self.inner.insert_post(user_id, title, body).await
    }

    async fn list_posts_for_user(&self, user_id: i64) -> SyncResult<Vec<Post>> {
        self.inner.list_posts_for_user(user_id).await
    }
}

/// `count` distinct remote posts for `user_id`
pub fn remote_posts(user_id: i64, count: usize) -> Vec<RemotePost> {
    (1..=count as i64)
        .map(|i| {
            post(
                user_id,
                user_id * 100 + i,
                &format!("title {} of user {}", i, user_id),
                &format!("body {} of user {}", i, user_id),
            )
        })
        .collect()
}

/// Remote source with a single user `Leanne <a@b.com>` (id 1) and `posts` posts
pub fn leanne_source(posts: usize) -> MockRemoteSource {
    MockRemoteSource::new(
        vec![user(1, "Leanne", "a@b.com", "Gwenborough", "Romaguera-Crona")],
        remote_posts(1, posts),
    )
}
