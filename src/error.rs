use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the lookup core.
///
/// Both variants are recoverable: the presentation layer shows a message
/// and carries on.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is missing or could not be parsed. Nothing can be
    /// searched until a usable file is provided.
    #[error("data unavailable: {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// Grouping was asked for an identifier that no row carries.
    #[error("no trainee with identifier '{0}'")]
    IdentifierNotFound(String),
}

impl DataError {
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DataError::Unavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DataError::Unavailable { .. })
    }
}
