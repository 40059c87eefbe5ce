//! Error types for draftkit.

use thiserror::Error;

/// Main error type for draft operations.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The media file is missing or could not be read.
    #[error("Media unresolved: {0}")]
    MediaUnresolved(String),

    #[error("Unsupported media kind: {0}")]
    UnsupportedMediaKind(String),

    #[error("Probe error: {0}")]
    Probe(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DraftError {
    /// Whether this error means "no entity could be built for this media".
    ///
    /// Placement treats these as a silent skip rather than a failure.
    pub fn is_unresolved_media(&self) -> bool {
        matches!(
            self,
            DraftError::MediaUnresolved(_) | DraftError::UnsupportedMediaKind(_) | DraftError::Probe(_)
        )
    }
}

/// Result type alias for draft operations.
pub type Result<T> = std::result::Result<T, DraftError>;
