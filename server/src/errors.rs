//! Custom error types for the gateway server
//!
//! Provides structured error handling with context for different failure scenarios.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Main error type for the gateway server
#[derive(Debug)]
pub enum ServerError {
    /// Asynchronous operation bookkeeping errors
    Async(AsyncHttpError),

    /// Errors talking to the storage backend
    Backend(BackendError),

    /// Configuration-related errors
    Config(ConfigError),

    /// Request addressed a collection the gateway does not serve
    UnknownCollection { name: String },
}

/// Asynchronous operation error variants
#[derive(Debug)]
pub enum AsyncHttpError {
    /// Every generated id collided with a tracked operation
    IdExhausted { attempts: usize },
}

/// Storage backend error variants
#[derive(Debug)]
pub enum BackendError {
    /// Could not reach the backend
    ConnectionFailed { url: String, reason: String },

    /// Backend answered with a non-success status
    Rejected { status: u16, message: String },

    /// Backend answered with a body we could not understand
    InvalidResponse { url: String, reason: String },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Async(e) => write!(f, "Async operation error: {}", e),
            ServerError::Backend(e) => write!(f, "Backend error: {}", e),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::UnknownCollection { name } => {
                write!(f, "Unknown collection '{}'", name)
            }
        }
    }
}

impl fmt::Display for AsyncHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncHttpError::IdExhausted { attempts } => {
                write!(
                    f,
                    "Unable to generate a unique operation id after {} attempts",
                    attempts
                )
            }
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ConnectionFailed { url, reason } => {
                write!(f, "Connection to {} failed: {}", url, reason)
            }
            BackendError::Rejected { status, message } => {
                if message.is_empty() {
                    write!(f, "Backend returned status {}", status)
                } else {
                    write!(f, "{}", message)
                }
            }
            BackendError::InvalidResponse { url, reason } => {
                write!(f, "Invalid response from {}: {}", url, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ServerError {}
impl std::error::Error for AsyncHttpError {}
impl std::error::Error for BackendError {}
impl std::error::Error for ConfigError {}

impl From<AsyncHttpError> for ServerError {
    fn from(err: AsyncHttpError) -> Self {
        ServerError::Async(err)
    }
}

impl From<BackendError> for ServerError {
    fn from(err: BackendError) -> Self {
        ServerError::Backend(err)
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        ServerError::Config(err)
    }
}

impl IntoResponse for AsyncHttpError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Async(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::UnknownCollection { .. } => StatusCode::NOT_FOUND,
            ServerError::Backend(BackendError::Rejected { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ServerError::Backend(_) => StatusCode::BAD_GATEWAY,
        };

        let message = match self {
            ServerError::Backend(e) => e.to_string(),
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}
