// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via Docker-compatible API.

use crate::fs::{recreate_file, remove_if_exists};
use crate::inventory::{ImageEntry, VolumeEntry};
use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    HelperSpec, ImageError, ImageOps, LoadMessage, LoadOutcome, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, VolumeError, VolumeOps,
};
use crate::runtime::types::{Endpoint, RuntimeInfo as EngineInfo, RuntimeType};
use crate::types::ContainerId;
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{ContainerCreateBody, HostConfig};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, ImportImageOptions, ListImagesOptions,
    ListVolumesOptions, RemoveContainerOptions, StartContainerOptions, WaitContainerOptions,
};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn is_not_found(e: &bollard::errors::Error) -> bool {
    matches!(
        e,
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}

fn map_image_save_error(e: bollard::errors::Error, target: &str) -> ImageError {
    if is_not_found(&e) {
        ImageError::NotFound(target.to_string())
    } else {
        ImageError::SaveFailed {
            target: target.to_string(),
            message: e.to_string(),
        }
    }
}

fn map_image_io_error(error: std::io::Error, path: &Path) -> ImageError {
    ImageError::Io {
        path: path.display().to_string(),
        error,
    }
}

/// Write an export stream to `destination`. A partially written file is
/// removed when the stream or the write fails.
async fn write_archive<S>(
    destination: &Path,
    target: &str,
    first: Bytes,
    mut rest: S,
) -> Result<(), ImageError>
where
    S: Stream<Item = Result<Bytes, bollard::errors::Error>> + Unpin,
{
    let mut file = recreate_file(destination)
        .await
        .map_err(|e| map_image_io_error(e, destination))?;

    let written = async {
        file.write_all(&first)
            .await
            .map_err(|e| map_image_io_error(e, destination))?;
        while let Some(chunk) = rest.next().await {
            let chunk = chunk.map_err(|e| map_image_save_error(e, target))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| map_image_io_error(e, destination))?;
        }
        file.flush()
            .await
            .map_err(|e| map_image_io_error(e, destination))
    }
    .await;

    if written.is_err() {
        drop(file);
        if let Err(e) = remove_if_exists(destination).await {
            tracing::warn!(
                path = %destination.display(),
                error = %e,
                "could not remove partial archive"
            );
        }
    }
    written
}

fn map_helper_error(e: bollard::errors::Error) -> VolumeError {
    match e {
        bollard::errors::Error::DockerContainerWaitError { error, code } => {
            VolumeError::HelperFailed {
                code,
                message: error,
            }
        }
        other => VolumeError::Runtime(other.to_string()),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Supports both Docker and Podman via Docker-compatible API.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// Use with `detect_local()` to find the endpoint first.
    pub fn connect(info: &EngineInfo, timeout: Duration) -> Result<Self, RuntimeInfoError> {
        let client = match &info.endpoint {
            Endpoint::Socket(path) => {
                Docker::connect_with_unix(path, timeout.as_secs(), bollard::API_DEFAULT_VERSION)
            }
            // bollard reads DOCKER_HOST (and its TLS settings) itself.
            Endpoint::Host(_) => Docker::connect_with_defaults().map(|d| d.with_timeout(timeout)),
        }
        .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        tracing::debug!(endpoint = %info.endpoint, runtime = %info.runtime_type, "connected");
        Ok(Self::new(client, info.runtime_type))
    }

    /// Run one helper container to completion, then remove it.
    async fn run_helper(
        &self,
        spec: &HelperSpec,
        cmd: Vec<String>,
        read_only_volume: bool,
    ) -> Result<(), VolumeError> {
        let body = ContainerCreateBody {
            image: Some(spec.image.clone()),
            cmd: Some(cmd),
            host_config: Some(HostConfig {
                binds: Some(spec.binds(read_only_volume)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(None::<CreateContainerOptions>, body)
            .await
            .map_err(map_helper_error)?;
        let id = ContainerId::new(response.id);
        tracing::debug!(container = %id, volume = %spec.volume, "helper container created");

        let result = self.start_and_wait(&id).await;
        self.remove_helper(&id).await;
        result
    }

    async fn start_and_wait(&self, id: &ContainerId) -> Result<(), VolumeError> {
        self.client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_helper_error)?;

        let mut wait = Box::pin(
            self.client
                .wait_container(id.as_str(), None::<WaitContainerOptions>),
        );
        while let Some(result) = wait.next().await {
            let response = result.map_err(map_helper_error)?;
            if response.status_code != 0 {
                return Err(VolumeError::HelperFailed {
                    code: response.status_code,
                    message: response
                        .error
                        .and_then(|e| e.message)
                        .unwrap_or_default(),
                });
            }
        }

        Ok(())
    }

    async fn remove_helper(&self, id: &ContainerId) {
        let opts = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };

        if let Err(e) = self.client.remove_container(id.as_str(), Some(opts)).await {
            tracing::warn!(container = %id, "failed to remove helper container: {}", e);
        }
    }
}

// Implement Sealed trait to allow runtime trait implementations
impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::Runtime(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn list_images(&self) -> Result<Vec<ImageEntry>, ImageError> {
        let opts = ListImagesOptions {
            all: true,
            ..Default::default()
        };

        let summaries = self
            .client
            .list_images(Some(opts))
            .await
            .map_err(|e| ImageError::Unavailable(e.to_string()))?;

        Ok(summaries
            .into_iter()
            .flat_map(|s| ImageEntry::from_summary(&s.repo_tags, &s.id, s.created, s.size))
            .collect())
    }

    async fn image_exists(&self, reference: &str) -> Result<bool, ImageError> {
        match self.client.inspect_image(reference).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(ImageError::Runtime(format!(
                "failed to inspect {}: {}",
                reference, e
            ))),
        }
    }

    async fn pull_image(&self, reference: &str) -> Result<(), ImageError> {
        let opts = CreateImageOptions {
            from_image: Some(reference.to_string()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| ImageError::PullFailed(format!("{}: {}", reference, e)))?;
        }

        Ok(())
    }

    async fn save_image(&self, target: &str, destination: &Path) -> Result<(), ImageError> {
        let mut stream = Box::pin(self.client.export_image(target));

        // Fail before touching the destination when the engine rejects the target.
        let first = match stream.next().await {
            Some(chunk) => chunk.map_err(|e| map_image_save_error(e, target))?,
            None => Bytes::new(),
        };

        write_archive(destination, target, first, stream).await
    }

    async fn load_image(&self, source: &Path) -> Result<LoadOutcome, ImageError> {
        let file = tokio::fs::File::open(source)
            .await
            .map_err(|e| map_image_io_error(e, source))?;

        let opts = ImportImageOptions {
            quiet: true,
            ..Default::default()
        };
        let body = ReaderStream::new(file);

        let mut stream = Box::pin(self.client.import_image_stream(opts, body, None));
        let mut messages = Vec::new();

        while let Some(item) = stream.next().await {
            match item {
                Ok(info) => {
                    if let Some(message) = info.error_detail.and_then(|d| d.message) {
                        messages.push(LoadMessage::Error(message));
                    } else if let Some(line) = info.stream {
                        messages.push(LoadMessage::Stream(line.trim_end().to_string()));
                    }
                }
                Err(bollard::errors::Error::DockerStreamError { error }) => {
                    messages.push(LoadMessage::Error(error));
                }
                Err(e) => {
                    return Err(ImageError::LoadFailed {
                        path: source.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(LoadOutcome::from_messages(messages))
    }
}

#[async_trait]
impl VolumeOps for BollardRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeEntry>, VolumeError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions>)
            .await
            .map_err(|e| VolumeError::Unavailable(e.to_string()))?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| VolumeEntry {
                name: v.name,
                driver: v.driver,
                mountpoint: v.mountpoint,
            })
            .collect())
    }

    async fn volume_exists(&self, name: &str) -> Result<bool, VolumeError> {
        match self.client.inspect_volume(name).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(VolumeError::Runtime(format!(
                "failed to inspect {}: {}",
                name, e
            ))),
        }
    }

    async fn backup_volume(&self, spec: &HelperSpec) -> Result<(), VolumeError> {
        self.run_helper(spec, spec.backup_command(), true).await
    }

    async fn restore_volume(&self, spec: &HelperSpec) -> Result<(), VolumeError> {
        self.run_helper(spec, spec.restore_command(), false).await
    }
}
