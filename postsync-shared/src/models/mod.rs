/// Database models for PostSync
///
/// # Models
///
/// - `user`: Users imported from the remote catalog
/// - `post`: Posts bulk-imported per remote user id
///
/// # Example
///
/// ```no_run
/// use postsync_shared::models::post::{CreatePost, Post};
/// use postsync_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
/// run_migrations(&pool).await?;
///
/// Post::create(&pool, CreatePost {
///     user_id: 1,
///     title: "sunt aut facere".to_string(),
///     body: "quia et suscipit".to_string(),
/// }).await?;
///
/// assert!(Post::exists_for_user(&pool, 1).await?);
/// # Ok(())
/// # }
/// ```

pub mod post;
pub mod user;
