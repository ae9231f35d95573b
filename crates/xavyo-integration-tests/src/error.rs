//! Harness error types

use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Failures surfaced to the test that issued the call.
///
/// Nothing here is retried or recovered: the suites exist to expose backend
/// defects, so every variant propagates straight to the failing test.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Connection failed: {0}\n\nIs the admin API running? Check XAVYO_TEST_API_URL.")]
    ConnectionFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected status: expected {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),
}

impl HarnessError {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HarnessError::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HarnessError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            HarnessError::ConnectionFailed(e.to_string())
        } else if e.is_timeout() {
            HarnessError::Network("Request timed out".to_string())
        } else {
            HarnessError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::MalformedJson(e.to_string())
    }
}

impl From<crate::config::ConfigError> for HarnessError {
    fn from(e: crate::config::ConfigError) -> Self {
        HarnessError::InvalidConfig(e.to_string())
    }
}
