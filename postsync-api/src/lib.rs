//! # PostSync API Server Library
//!
//! HTTP surface over the PostSync import workflow.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `telemetry`: Tracing subscriber setup

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;
