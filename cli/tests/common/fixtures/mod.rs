//! Shared helpers for the client tests:
//! - Mock gateway speaking the asynchronous operation protocol
//! - Client configuration pointed at a mock

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_gateway;

pub use mock_gateway::{fast_config, MockGateway};
