//! Error types for the Fernotes core library.

use thiserror::Error;

/// All errors that can occur within the Fernotes core library.
#[derive(Debug, Error)]
pub enum FernotesError {
    /// A parse was requested on an empty or whitespace-only outline.
    #[error("Nothing to parse: the outline is empty")]
    EmptyOutline,

    /// An import payload could not be understood.
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored or exchanged data could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias that pins the error type to [`FernotesError`].
pub type Result<T> = std::result::Result<T, FernotesError>;

impl FernotesError {
    /// Returns a short, human-readable message suitable for display to the
    /// end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyOutline => "Please enter some note titles first".to_string(),
            Self::InvalidImport(msg) => format!("Error importing file: {msg}"),
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::Io(e) => format!("File error: {e}"),
        }
    }
}
