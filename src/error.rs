// ABOUTME: Application-wide error types for wocker.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::archive::{ArchiveError, UsageError};
use crate::runtime::{ImageError, RuntimeError, VolumeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}: specify one of --list, --save or --load")]
    NoAction(&'static str),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("{failed} of {total} item(s) failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
