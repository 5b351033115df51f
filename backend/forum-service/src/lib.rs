/// Forum Service Library
///
/// Peer-support discussion forum backend: posts, comments and likes, with
/// category filtering and keyword search.
///
/// # Modules
///
/// - `app`: Route table, CORS, security headers and body limits
/// - `handlers`: Forum HTTP request handlers
/// - `models`: Data structures for posts, comments, categories and likes
/// - `services`: Business logic layer
/// - `store`: Persistence boundary and its PostgreSQL implementation
/// - `db`: Connection pooling, migrations and repositories
/// - `middleware`: HTTP middleware for rate limiting
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{ForumStore, PgForumStore};
