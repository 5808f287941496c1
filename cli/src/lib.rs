pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod poller;

// Re-export commonly used types
pub use client::HeketiClient;
pub use commands::Cli;
pub use config::ClientConfig;
pub use errors::ClientError;
pub use poller::{PollOutcome, Poller};
