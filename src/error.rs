//! Error types for pomotrack.

use thiserror::Error;

/// Errors surfaced by pomotrack.
///
/// The timer core itself never fails; these errors come from configuration,
/// storage and output formatting, and are mostly logged rather than returned.
#[derive(Debug, Error)]
pub enum PomoError {
    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// The history storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON serialization or parsing failed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Something the user referred to does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
