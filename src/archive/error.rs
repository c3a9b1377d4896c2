// ABOUTME: Error types for archive batches.
// ABOUTME: Per-item failures plus the usage error raised before any engine call.

use crate::runtime::{ImageError, VolumeError};
use nonempty::NonEmpty;

/// Failure of one save or load item.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("Not a volume archive file: {0}")]
    NotVolumeArchive(String),

    #[error("Volume already exists: {0}")]
    VolumeExists(String),

    #[error("cannot access {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: &std::path::Path, error: std::io::Error) -> Self {
        ArchiveError::Io {
            path: path.display().to_string(),
            error,
        }
    }
}

/// A save or load command was given nothing to work on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please specify the {what} to {verb}")]
pub struct UsageError {
    pub what: &'static str,
    pub verb: &'static str,
}

/// Turn raw command operands into a non-empty list, or a usage error.
pub fn require_operands<T>(
    operands: Vec<T>,
    what: &'static str,
    verb: &'static str,
) -> Result<NonEmpty<T>, UsageError> {
    NonEmpty::from_vec(operands).ok_or(UsageError { what, verb })
}
