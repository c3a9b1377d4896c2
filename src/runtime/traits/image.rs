// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: List, pull, export to an archive file, and load from one.

use super::sealed::Sealed;
use super::shared_types::LoadOutcome;
use crate::inventory::ImageEntry;
use async_trait::async_trait;
use std::path::Path;

/// Image operations: inventory, pull, save and load.
#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Snapshot of every image, one entry per `repository:tag`.
    async fn list_images(&self) -> Result<Vec<ImageEntry>, ImageError>;

    /// Check if an image exists locally.
    async fn image_exists(&self, reference: &str) -> Result<bool, ImageError>;

    /// Pull an image from its registry.
    async fn pull_image(&self, reference: &str) -> Result<(), ImageError>;

    /// Export `target` (`repo:tag` or id) into a freshly recreated file.
    async fn save_image(&self, target: &str, destination: &Path) -> Result<(), ImageError>;

    /// Load every image contained in an archive file.
    async fn load_image(&self, source: &Path) -> Result<LoadOutcome, ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("container engine unavailable: {0}")]
    Unavailable(String),

    #[error("No such image: {0}")]
    NotFound(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("save failed for {target}: {message}")]
    SaveFailed { target: String, message: String },

    #[error("load failed for {path}: {message}")]
    LoadFailed { path: String, message: String },

    #[error("cannot access {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("runtime error: {0}")]
    Runtime(String),
}
