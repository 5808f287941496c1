//! Application-wide constants for routes, headers and defaults

use axum::http::HeaderName;

/// Route constants
pub mod routes {
    /// Prefix under which asynchronous operations are polled
    pub const DEFAULT_QUEUE_ROUTE: &str = "/queue";

    /// Summary of tracked operations
    pub const OPERATIONS: &str = "/operations";

    /// Liveness check
    pub const HELLO: &str = "/hello";
}

/// Header constants
pub mod headers {
    use super::HeaderName;

    /// Set to `true` on status responses for operations that have not finished
    pub const PENDING: HeaderName = HeaderName::from_static("x-pending");
}

/// Defaults used when the configuration file omits a value
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";

    pub const PORT: u16 = 8080;

    pub const BACKEND_URL: &str = "http://127.0.0.1:8081";

    /// Upper bound for a single request to the storage backend
    pub const BACKEND_TIMEOUT_SECONDS: u64 = 300;

    pub const CONFIG_DIR: &str = "config";
}

/// Operation id generation
pub mod ids {
    /// Fresh ids tried before giving up on a collision
    pub const MAX_ATTEMPTS: usize = 3;
}
