//! # Error Types Module
//!
//! Structured error types for the storefront bot. Commerce errors never leave
//! the commerce client (they are logged and turned into empty results), relay
//! errors become a user-facing notice, and configuration errors stop startup.

use thiserror::Error;

/// Configuration validation errors raised while reading the environment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset, empty or still holds its placeholder
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable is present but cannot be parsed
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failures of a single commerce API call
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Network failure or timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    /// Body is not the expected JSON shape
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// Circuit breaker is open, the call was not attempted
    #[error("circuit breaker open")]
    CircuitOpen,
}

/// Menu lookup errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
}

/// Relay delivery failure; a single attempt is made per submission
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("relay delivery failed: {cause}")]
pub struct RelayError {
    pub cause: String,
}

impl RelayError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
