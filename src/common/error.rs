//! Error types for the smoke test runner
//!
//! Every variant is fatal to a run. Assertion variants name the step that
//! failed so the printed diagnostic is enough to locate the problem.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Assertion Errors ===
    #[error("{step}: Unexpected status code {actual} (expected {expected})")]
    UnexpectedStatus {
        step: String,
        expected: u16,
        actual: u16,
    },

    #[error("{step}: Unexpected status code {status} (service accepted a request it must reject)")]
    UnexpectedSuccess { step: String, status: u16 },

    #[error("{step}: {field} not found in response")]
    MissingField { step: String, field: String },

    #[error("Smoke test failed at step {step}/{total}: {message}")]
    JourneyFailed {
        step: usize,
        total: usize,
        message: String,
    },

    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{0}'. Expected something like http://localhost:5000")]
    InvalidBaseUrl(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unexpected status error
    pub fn unexpected_status(step: &str, expected: u16, actual: u16) -> Self {
        Self::UnexpectedStatus {
            step: step.to_string(),
            expected,
            actual,
        }
    }

    /// Create an unexpected success error
    pub fn unexpected_success(step: &str, status: u16) -> Self {
        Self::UnexpectedSuccess {
            step: step.to_string(),
            status,
        }
    }

    /// Create a missing field error
    pub fn missing_field(step: &str, field: &str) -> Self {
        Self::MissingField {
            step: step.to_string(),
            field: field.to_string(),
        }
    }

    /// Whether the service answered but not the way the journey expects
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedStatus { .. }
                | Error::UnexpectedSuccess { .. }
                | Error::MissingField { .. }
        )
    }
}
