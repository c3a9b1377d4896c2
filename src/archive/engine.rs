// ABOUTME: Binds the batch capabilities to a container runtime.
// ABOUTME: Images go through export/load; volumes through tar in a helper container.

use super::error::ArchiveError;
use super::executor::{LoadCapable, SaveCapable};
use crate::fs::{absolute_dir, recreate_file, remove_if_exists};
use crate::runtime::{HelperSpec, ImageOps, LoadMessage, LoadOutcome, VolumeError, VolumeOps};
use crate::types::VolumeName;
use async_trait::async_trait;
use std::path::Path;

/// Saves and loads images through the engine's image archive API.
pub struct ImageArchiver<'a, R: ?Sized> {
    runtime: &'a R,
}

impl<'a, R: ImageOps + ?Sized> ImageArchiver<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }
}

#[async_trait]
impl<'a, R: ImageOps + ?Sized> SaveCapable for ImageArchiver<'a, R> {
    async fn save_entity(&self, target: &str, destination: &Path) -> Result<(), ArchiveError> {
        self.runtime.save_image(target, destination).await?;
        Ok(())
    }
}

#[async_trait]
impl<'a, R: ImageOps + ?Sized> LoadCapable for ImageArchiver<'a, R> {
    async fn load_entity(&self, source: &Path) -> Result<LoadOutcome, ArchiveError> {
        Ok(self.runtime.load_image(source).await?)
    }
}

/// Saves and loads volume contents with a throwaway `tar` container.
pub struct VolumeArchiver<'a, R: ?Sized> {
    runtime: &'a R,
    helper_image: String,
    extension: String,
}

impl<'a, R: ImageOps + VolumeOps + ?Sized> VolumeArchiver<'a, R> {
    pub fn new(runtime: &'a R, helper_image: &str, extension: &str) -> Self {
        Self {
            runtime,
            helper_image: helper_image.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Make sure the helper image is present, pulling it if needed.
    pub async fn prepare(&self) -> Result<(), ArchiveError> {
        if !self.runtime.image_exists(&self.helper_image).await? {
            tracing::info!(image = %self.helper_image, "pulling helper image");
            self.runtime.pull_image(&self.helper_image).await?;
        }
        Ok(())
    }

    async fn helper_spec(&self, volume: &str, archive: &Path) -> Result<HelperSpec, ArchiveError> {
        let file_name = file_name_of(archive)?;
        let dir = match archive.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let host_dir = absolute_dir(dir)
            .await
            .map_err(|e| ArchiveError::io(dir, e))?;

        Ok(HelperSpec {
            image: self.helper_image.clone(),
            volume: volume.to_string(),
            host_dir: host_dir.display().to_string(),
            file_name: file_name.to_string(),
        })
    }
}

#[async_trait]
impl<'a, R: ImageOps + VolumeOps + ?Sized> SaveCapable for VolumeArchiver<'a, R> {
    async fn save_entity(&self, target: &str, destination: &Path) -> Result<(), ArchiveError> {
        // The helper would otherwise create an empty volume of that name.
        if !self.runtime.volume_exists(target).await? {
            return Err(VolumeError::NotFound(target.to_string()).into());
        }

        let spec = self.helper_spec(target, destination).await?;

        // The helper writes the archive; start it from an empty file.
        recreate_file(destination)
            .await
            .map_err(|e| ArchiveError::io(destination, e))?;

        if let Err(e) = self.runtime.backup_volume(&spec).await {
            if let Err(cleanup) = remove_if_exists(destination).await {
                tracing::warn!(
                    path = %destination.display(),
                    error = %cleanup,
                    "could not remove partial archive"
                );
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl<'a, R: ImageOps + VolumeOps + ?Sized> LoadCapable for VolumeArchiver<'a, R> {
    async fn load_entity(&self, source: &Path) -> Result<LoadOutcome, ArchiveError> {
        let name = volume_name_for(file_name_of(source)?, &self.extension)?;

        tokio::fs::metadata(source)
            .await
            .map_err(|e| ArchiveError::io(source, e))?;

        if self.runtime.volume_exists(name.as_str()).await? {
            return Err(ArchiveError::VolumeExists(name.to_string()));
        }

        let spec = self.helper_spec(name.as_str(), source).await?;
        self.runtime.restore_volume(&spec).await?;

        Ok(LoadOutcome::from_messages(vec![LoadMessage::Stream(
            format!("Loaded volume: {name}"),
        )]))
    }
}

fn file_name_of(path: &Path) -> Result<&str, ArchiveError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ArchiveError::NotVolumeArchive(path.display().to_string()))
}

/// Recover the volume name from `<name>.<extension>`.
pub fn volume_name_for(file_name: &str, extension: &str) -> Result<VolumeName, ArchiveError> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    file_name
        .strip_suffix(&suffix)
        .and_then(|stem| VolumeName::new(stem).ok())
        .ok_or_else(|| ArchiveError::NotVolumeArchive(file_name.to_string()))
}
