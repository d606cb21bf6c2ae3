//! Error types for knowledge-base loading.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort a knowledge-base load.
///
/// Any of these discards the indices being built; the previously published
/// indices stay in place.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// A referenced tag or expected directory does not exist.
    #[error("Missing resource: {}", path.display())]
    MissingResource {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A record is missing a required field or has an unexpected shape.
    #[error("Malformed record {}: {reason}", path.display())]
    MalformedRecord {
        /// File containing the record
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Any other I/O failure while reading the knowledge-base directory.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl KnowledgeError {
    /// Classifies an I/O error raised while accessing `path`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::MissingResource {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps a decoding failure for the record at `path`.
    pub(crate) fn malformed(path: &Path, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for knowledge-base operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
