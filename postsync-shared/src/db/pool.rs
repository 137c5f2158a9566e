/// Database connection pool management
///
/// This module builds the SQLite connection pool that backs the persistence
/// store. It includes a health check on startup and pool statistics for
/// the health endpoint.
///
/// # In-memory databases
///
/// An in-memory SQLite database only lives as long as a connection to it is
/// open. For `sqlite::memory:` URLs the pool is therefore pinned to a single
/// connection that is never reaped for idleness or age, which keeps the data
/// alive for the process lifetime.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://postsync.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the database connection pool
///
/// All timeouts are specified in seconds for ease of configuration from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g., "sqlite://postsync.db" or "sqlite::memory:")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// Ignored for in-memory databases, which always use one connection.
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,

    /// How long a connection can remain idle before being closed (seconds)
    ///
    /// None = connections never closed due to idle time
    pub idle_timeout_seconds: Option<u64>,

    /// Maximum lifetime of a connection before forced recycling (seconds)
    pub max_lifetime_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
        }
    }
}

impl DatabaseConfig {
    /// In-memory configuration, mostly for tests
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Whether the URL points at an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Parses the URL, creating the database file if it is missing
/// 2. Creates a pool with the specified configuration
/// 3. Performs a health check to verify the database responds
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened
/// or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = config.is_in_memory();

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        in_memory,
        "Creating database connection pool"
    );

    // Posts may reference users that were never imported
    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(false);

    let pool_options = if in_memory {
        debug!("Pinning in-memory database to a single connection");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        if let Some(idle_timeout) = config.idle_timeout_seconds {
            pool_options = pool_options.idle_timeout(Duration::from_secs(idle_timeout));
            debug!(idle_timeout_seconds = idle_timeout, "Set idle timeout");
        }

        if let Some(max_lifetime) = config.max_lifetime_seconds {
            pool_options = pool_options.max_lifetime(Duration::from_secs(max_lifetime));
            debug!(max_lifetime_seconds = max_lifetime, "Set max lifetime");
        }

        pool_options
    };

    let pool = pool_options.connect_with(connect_options).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Current pool statistics
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub active_connections: usize,

    /// Number of idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

/// Gets current pool statistics for monitoring
pub fn get_pool_stats(pool: &SqlitePool) -> PoolStats {
    let size = pool.size();
    let idle = pool.num_idle();

    PoolStats {
        active_connections: (size as usize).saturating_sub(idle),
        idle_connections: idle,
        total_connections: size as usize,
    }
}

/// Gracefully closes the connection pool
///
/// For in-memory databases this discards all stored data.
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}
