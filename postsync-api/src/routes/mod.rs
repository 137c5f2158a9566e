/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Remote users and user import
/// - `posts`: Remote posts, bulk import and export

pub mod health;
pub mod posts;
pub mod users;
