//! Error types for the console E2E suite

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Driver service failed to start: {0}")]
    ServiceStartup(String),

    #[error("Driver service health check failed after {0} attempts")]
    ServiceHealthCheck(usize),

    #[error("WebDriver error: {error} - {message}")]
    WebDriver { error: String, message: String },

    #[error("Unexpected WebDriver response: {0}")]
    Protocol(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Assertion failed on {locator}: expected {expected}, got {actual}")]
    AssertionFailed {
        locator: String,
        expected: String,
        actual: String,
    },

    #[error("Timeout after {timeout_ms} ms waiting for {locator} to be {state}")]
    Timeout {
        locator: String,
        state: String,
        timeout_ms: u64,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Screenshot decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl E2eError {
    pub fn assertion(
        locator: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        E2eError::AssertionFailed {
            locator: locator.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
