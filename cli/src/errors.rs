//! Errors reported by the gateway client

use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ClientError {
    /// Request never got an answer
    Transport { url: String, reason: String },

    /// Gateway or backend reported a failure
    Server { status: u16, message: String },

    /// Resource or operation does not exist (or was already collected)
    NotFound { location: String },

    /// Operation was still pending when the polling timeout ran out
    Timeout { location: String, waited: Duration },

    /// 202 response without a `Location` header
    MissingLocation,

    /// Response body was not what the status promised
    InvalidResponse { url: String, reason: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport { url, reason } => {
                write!(f, "Unable to send command to server at {}: {}", url, reason)
            }
            ClientError::Server { status, message } => {
                if message.trim().is_empty() {
                    write!(f, "Server returned status {}", status)
                } else {
                    write!(f, "{}", message.trim_end())
                }
            }
            ClientError::NotFound { location } => write!(f, "{} not found", location),
            ClientError::Timeout { location, waited } => write!(
                f,
                "Gave up waiting for {} after {:.1}s",
                location,
                waited.as_secs_f64()
            ),
            ClientError::MissingLocation => {
                write!(f, "Server accepted the request without a Location header")
            }
            ClientError::InvalidResponse { url, reason } => {
                write!(f, "Bad response from {}: {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub(crate) fn transport(url: &str, error: reqwest::Error) -> Self {
        ClientError::Transport {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
