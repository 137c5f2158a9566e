/// Persistence store for imported users and posts
///
/// The [`Store`] trait is the narrow contract the reconciler and exporter
/// depend on. [`SqliteStore`] is the production implementation over the
/// SQLite pool; tests wrap it to inject faults.
///
/// # Contract
///
/// - `user_exists(email)`: exact email match
/// - `insert_user(name, email)`: writes name and email only, fails with
///   `ConstraintViolation` on a duplicate email
/// - `posts_exist_for_user(user_id)`: at least one post row for the id
/// - `insert_post(user_id, title, body)`: one row, no uniqueness
/// - `list_posts_for_user(user_id)`: insertion order
///
/// No operation opens a transaction spanning several inserts.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::store::{SqliteStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteStore::in_memory().await?;
///
/// store.insert_user("Leanne Graham", "Sincere@april.biz").await?;
/// assert!(store.user_exists("Sincere@april.biz").await?);
/// # Ok(())
/// # }
/// ```

use crate::db::migrations::run_migrations;
use crate::db::pool::{create_pool, DatabaseConfig};
use crate::error::{SyncError, SyncResult};
use crate::models::post::{CreatePost, Post};
use crate::models::user::{CreateUser, User};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

/// Local persistence of imported users and posts
#[async_trait]
pub trait Store: Send + Sync {
    /// True iff a user row with exactly this email exists
    async fn user_exists(&self, email: &str) -> SyncResult<bool>;

    /// Inserts a user row with only name and email
    async fn insert_user(&self, name: &str, email: &str) -> SyncResult<User>;

    /// True iff at least one post row has this user id
    async fn posts_exist_for_user(&self, user_id: i64) -> SyncResult<bool>;

    /// Inserts one post row
    async fn insert_post(&self, user_id: i64, title: &str, body: &str) -> SyncResult<Post>;

    /// All posts stored for the user id, in insertion order
    async fn list_posts_for_user(&self, user_id: i64) -> SyncResult<Vec<Post>>;
}

/// SQLite-backed [`Store`]
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an existing pool. The schema must already be applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database described by `config` and applies the schema
    pub async fn connect(config: DatabaseConfig) -> SyncResult<Self> {
        let pool = create_pool(config).await?;
        run_migrations(&pool)
            .await
            .map_err(|e| SyncError::Store(format!("Failed to apply schema: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Fresh in-memory store with the schema applied
    pub async fn in_memory() -> SyncResult<Self> {
        Self::connect(DatabaseConfig::in_memory()).await
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn user_exists(&self, email: &str) -> SyncResult<bool> {
        Ok(User::exists_by_email(&self.pool, email).await?)
    }

    async fn insert_user(&self, name: &str, email: &str) -> SyncResult<User> {
        let user = User::create(
            &self.pool,
            CreateUser {
                name: name.to_string(),
                email: email.to_string(),
            },
        )
        .await?;

        debug!(user_id = user.id, email = %user.email, "Inserted user");
        Ok(user)
    }

    async fn posts_exist_for_user(&self, user_id: i64) -> SyncResult<bool> {
        Ok(Post::exists_for_user(&self.pool, user_id).await?)
    }

    async fn insert_post(&self, user_id: i64, title: &str, body: &str) -> SyncResult<Post> {
        let post = Post::create(
            &self.pool,
            CreatePost {
                user_id,
                title: title.to_string(),
                body: body.to_string(),
            },
        )
        .await?;

        Ok(post)
    }

    async fn list_posts_for_user(&self, user_id: i64) -> SyncResult<Vec<Post>> {
        Ok(Post::list_for_user(&self.pool, user_id).await?)
    }
}
