//! Unified error types for Vistazo

use thiserror::Error;

/// Unified error type for all Vistazo operations
#[derive(Error, Debug)]
pub enum VistazoError {
    // Driver lifecycle errors
    #[error("Unsupported browser: {0} (only chrome is supported)")]
    UnsupportedBrowser(String),

    #[error("Browser error: {0}")]
    Browser(String),

    // Page object errors
    #[error("Element {selector} did not appear within {timeout_secs}s")]
    ElementTimeout { selector: String, timeout_secs: u64 },

    #[error("Assertion failed: expected text containing {expected:?}, got {actual:?}")]
    AssertionMismatch { expected: String, actual: String },

    // Scenario compilation errors
    #[error("No step definition matches: {0}")]
    UndefinedStep(String),

    #[error("Feature parse error: {0}")]
    FeatureParse(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using VistazoError
pub type Result<T> = std::result::Result<T, VistazoError>;
