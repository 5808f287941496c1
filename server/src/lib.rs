pub mod async_http;
pub mod backend;
pub mod config;
pub mod constants;
pub mod errors;
pub mod web;

// Re-export commonly used types
pub use async_http::{AsyncHandle, AsyncHttpManager, OperationSummary, Outcome};
pub use backend::{BackendClient, Collection};
pub use config::{Config, ConfigManager};
pub use errors::{AsyncHttpError, BackendError, ConfigError, ServerError};
pub use web::AppState;
