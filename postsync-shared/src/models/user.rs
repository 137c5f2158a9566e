/// Imported user model and database operations
///
/// Users are copied from the remote catalog on an explicit import. Email is
/// the identity used for existence checks and is unique across the table.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     phone TEXT,
///     website TEXT,
///     city TEXT,
///     company TEXT
/// );
/// ```
///
/// Only `name` and `email` are written on insert. The other columns exist
/// in the schema but stay NULL.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::models::user::{User, CreateUser};
/// use postsync_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Leanne Graham".to_string(),
///     email: "Sincere@april.biz".to_string(),
/// }).await?;
/// println!("Imported user: {}", user.id);
///
/// assert!(User::exists_by_email(&pool, "Sincere@april.biz").await?);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Local row id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address (unique, compared exactly)
    pub email: String,

    /// Never written by the import path
    pub phone: Option<String>,

    /// Never written by the import path
    pub website: Option<String>,

    /// Never written by the import path
    pub city: Option<String>,

    /// Never written by the import path
    pub company: Option<String>,
}

/// Input for importing a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl User {
    /// Inserts a new user with only name and email
    ///
    /// # Errors
    ///
    /// Returns a database error carrying a unique violation if the email is
    /// already stored, or any other error from the connection.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES (?, ?)
            RETURNING id, name, email, phone, website, city, company
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Returns true if a row with exactly this email exists
    pub async fn exists_by_email(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(pool)
            .await?;

        Ok(exists)
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, website, city, company
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts stored users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
