//! # PostSync Shared Library
//!
//! Persistence, remote access and the import workflow used by the PostSync
//! API server.
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and schema bootstrap
//! - `models`: User and post rows with their queries
//! - `store`: The persistence contract and its SQLite implementation
//! - `remote`: Remote catalog client (HTTP and in-memory)
//! - `reconcile`: Existence checks and one-time imports
//! - `export`: Spreadsheet export of stored posts
//! - `error`: Shared error type

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod reconcile;
pub mod remote;
pub mod store;

pub use error::{SyncError, SyncResult};

/// Current version of the PostSync shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
