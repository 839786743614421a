use std::path::PathBuf;
use thiserror::Error;

/// Result type for seriescat operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Error types for seriescat operations
///
/// Only boundary conditions are errors: an unreadable top-level directory,
/// invalid configuration, or a failed output write. Everything inside the
/// pipeline (tool failures, missing tags, malformed tool output) degrades to
/// empty field values instead.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// The top-level subject directory could not be enumerated
    #[error("directory not readable: {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configured series directory pattern is not a valid glob
    #[error("invalid series pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    /// A modality profile spec string could not be parsed
    #[error("invalid modality profile: {0}")]
    InvalidProfile(String),

    /// Output table write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for HarvestError {
    fn from(s: String) -> Self {
        HarvestError::InvalidProfile(s)
    }
}
