/// Blog Service Library
///
/// Serves a multi-author blog: posts grouped into categories, comments on
/// posts, and author profile pages. Which records a request may see or change
/// is decided by the visibility and ownership policy.
///
/// # Modules
///
/// - `policy`: Viewer identity and visibility/ownership predicates
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Data structures for users, categories, posts, comments
/// - `services`: Business logic layer
/// - `db`: Persistence trait and PostgreSQL repositories
/// - `pagination`: Page-number pagination for listings
/// - `middleware`: Viewer identification and request metrics
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `server`: Running the HTTP server until shutdown
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod server;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use policy::{Policy, Viewer};
