//! HTTP request handlers for the gateway API.
//!
//! - `operations` - Asynchronous operation summary and liveness
//! - `resources` - Cluster, node and volume endpoints relayed to the backend

pub mod operations;
pub mod resources;

pub use operations::*;
pub use resources::*;
