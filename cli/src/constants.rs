//! Client-side defaults and environment variable names

pub mod env {
    pub const SERVER: &str = "HEKETI_CLI_SERVER";
    pub const POLL_MS: &str = "HEKETI_CLI_POLL_MS";
    pub const TIMEOUT_SECONDS: &str = "HEKETI_CLI_TIMEOUT_SECONDS";
    pub const KEY: &str = "HEKETI_CLI_KEY";
}

pub mod defaults {
    pub const POLL_INTERVAL_MS: u64 = 100;
}

pub mod headers {
    pub const PENDING: &str = "x-pending";
}
