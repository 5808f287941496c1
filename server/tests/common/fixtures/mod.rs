//! This module provides reusable test utilities:
//! - In-process HTTP requests against an axum router
//! - Mock storage backend
//! - Test configuration builders
//! - Common test data

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod http;
pub mod mock_backend;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use http::{get, poll_until_settled, send, send_with_token, TestResponse};
pub use mock_backend::MockBackend;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
