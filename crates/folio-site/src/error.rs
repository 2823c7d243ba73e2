//! Error types for site behaviors.

use std::path::PathBuf;

/// Errors raised by the site collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A stored or requested theme is not `light` or `dark`.
    #[error("invalid theme '{0}', expected 'light' or 'dark'")]
    InvalidTheme(String),

    /// A filter referenced a category no button offers.
    #[error("unknown project category: {0}")]
    UnknownCategory(String),

    /// IO error while reading or writing the preference store.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Store path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The preference store is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;
