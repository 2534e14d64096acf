//! Error types for chub-tagger

use crate::client::ClientError;
use thiserror::Error;

/// Failure while tagging a single file
#[derive(Debug, Error)]
pub enum TaggerError {
    /// Catalog API request failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] ClientError),

    /// Translation, config or tag store error
    #[error(transparent)]
    Common(#[from] chub_common::Error),

    /// IO error (prompts, file access)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tagging operations
pub type TaggerResult<T> = Result<T, TaggerError>;
