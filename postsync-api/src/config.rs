/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite::memory:)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size for file databases (default: 5)
/// - `REMOTE_SOURCE`: `http` or `mock` (default: http)
/// - `REMOTE_BASE_URL`: Remote catalog base URL (default: JSONPlaceholder)
/// - `REMOTE_TIMEOUT_SECS`: Remote request timeout (default: 10)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter (default: postsync_api=debug,postsync_shared=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use postsync_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use postsync_shared::db::pool::DatabaseConfig as PoolConfig;
use postsync_shared::remote::{RemoteConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Remote catalog configuration
    pub remote: RemoteSettings,

    /// Log output configuration
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins, `*` for any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Which remote source implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteKind {
    /// Live HTTP catalog
    Http,

    /// Built-in sample records, no network
    Mock,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Implementation to use
    pub kind: RemoteKind,

    /// Catalog base URL
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,

    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is not a number: {}", e))?;

        let remote_kind = parse_remote_kind(
            &env::var("REMOTE_SOURCE").unwrap_or_else(|_| "http".to_string()),
        )?;

        let remote_base_url =
            env::var("REMOTE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let remote_timeout_secs = env::var("REMOTE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("REMOTE_TIMEOUT_SECS is not a number: {}", e))?;

        if remote_timeout_secs == 0 {
            anyhow::bail!("REMOTE_TIMEOUT_SECS must be greater than zero");
        }

        let log_format =
            parse_log_format(&env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()))?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            remote: RemoteSettings {
                kind: remote_kind,
                base_url: remote_base_url,
                timeout_secs: remote_timeout_secs,
            },
            logging: LoggingConfig { format: log_format },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }

    /// Client settings for the HTTP remote source
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.remote.base_url.clone(),
            request_timeout: Duration::from_secs(self.remote.timeout_secs),
            ..Default::default()
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_remote_kind(raw: &str) -> anyhow::Result<RemoteKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "http" => Ok(RemoteKind::Http),
        "mock" => Ok(RemoteKind::Mock),
        other => anyhow::bail!("REMOTE_SOURCE must be 'http' or 'mock', got '{}'", other),
    }
}

fn parse_log_format(raw: &str) -> anyhow::Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
    }
}
