// ABOUTME: Volume operations trait for container runtimes.
// ABOUTME: List volumes and move their contents in and out of tar archives.

use super::sealed::Sealed;
use super::shared_types::HelperSpec;
use crate::inventory::VolumeEntry;
use async_trait::async_trait;

/// Volume operations: inventory, existence, backup and restore.
#[async_trait]
pub trait VolumeOps: Sealed + Send + Sync {
    /// Snapshot of every named volume.
    async fn list_volumes(&self) -> Result<Vec<VolumeEntry>, VolumeError>;

    /// Check if a volume with this name exists.
    async fn volume_exists(&self, name: &str) -> Result<bool, VolumeError>;

    /// Pack the volume into `spec.host_dir/spec.file_name` with a helper container.
    async fn backup_volume(&self, spec: &HelperSpec) -> Result<(), VolumeError>;

    /// Unpack `spec.host_dir/spec.file_name` into the volume, creating it.
    async fn restore_volume(&self, spec: &HelperSpec) -> Result<(), VolumeError>;
}

/// Errors from volume operations.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("container engine unavailable: {0}")]
    Unavailable(String),

    #[error("No such volume: {0}")]
    NotFound(String),

    #[error("helper container failed with exit code {code}: {message}")]
    HelperFailed { code: i64, message: String },

    #[error("runtime error: {0}")]
    Runtime(String),
}
