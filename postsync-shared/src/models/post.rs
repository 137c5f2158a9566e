/// Imported post model and database operations
///
/// Posts are written only by a bulk import for one remote user id. There
/// is no natural key, so importing the same set twice stores it twice.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE posts (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL,
///     title TEXT NOT NULL,
///     body TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A post row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Local row id, increases with insertion order
    pub id: i64,

    /// Remote user id the post was imported for
    pub user_id: i64,

    /// Post title
    pub title: String,

    /// Post body
    pub body: String,
}

/// Input for inserting a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Remote user id
    pub user_id: i64,

    /// Post title
    pub title: String,

    /// Post body
    pub body: String,
}

impl Post {
    /// Inserts one post
    pub async fn create(pool: &SqlitePool, data: CreatePost) -> Result<Self, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, title, body)
            VALUES (?, ?, ?)
            RETURNING id, user_id, title, body
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.body)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Returns true if at least one post is stored for the user id
    pub async fn exists_for_user(pool: &SqlitePool, user_id: i64) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE user_id = ?)")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Lists the posts stored for a user id in insertion order
    pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, body
            FROM posts
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Counts the posts stored for a user id
    pub async fn count_for_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
