//! Common error types for the CameraHub tools

use thiserror::Error;

/// Common result type for CameraHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the CameraHub crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A field that must hold a number could not be converted
    #[error("Malformed numeric value for {field}: {value:?}")]
    MalformedNumeric { field: String, value: String },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Error::MalformedNumeric {
            field: field.into(),
            value: value.into(),
        }
    }
}
