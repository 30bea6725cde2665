//! Content error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the post index and single-post loader.
///
/// None of these are retried: the content directory is static local data,
/// so a failure here means the content itself (or the request) is wrong.
#[derive(Debug, Error)]
pub enum ContentError {
    /// No document matches the requested slug
    #[error("no post found for slug '{0}'")]
    NotFound(String),

    /// The file could not be read or its front-matter could not be parsed
    #[error("malformed document {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    /// The `date` field is missing or does not parse to a calendar date
    #[error("invalid or missing date in {path}: {value:?}")]
    InvalidDate {
        path: PathBuf,
        value: Option<String>,
    },
}

impl ContentError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should map to a 404 at the page layer
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
