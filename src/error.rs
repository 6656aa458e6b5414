//! Error types for the content store

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or querying content
///
/// The enum is `Clone` because a failed aggregate is memoized and handed to
/// every caller in the same store scope.
#[derive(Error, Debug, Clone)]
pub enum ContentError {
    #[error("Invalid frontmatter in {slug}: {reason}")]
    Validation { slug: String, reason: String },

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("Loader task failed: {0}")]
    Join(String),
}

impl ContentError {
    pub(crate) fn validation(slug: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Whether this is a frontmatter validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a missing (or hidden) post
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ContentError>;
