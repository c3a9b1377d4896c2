// ABOUTME: Container engine access for Docker and Podman.
// ABOUTME: Detects the local socket and exposes capability traits over bollard.

mod bollard;
mod detection;
mod error;
pub mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DOCKER_HOST_ENV, DetectionError, detect_local};
pub use error::RuntimeError;
pub use traits::{
    FullRuntime, HelperSpec, ImageError, ImageOps, LoadMessage, LoadOutcome,
    RuntimeInfo as RuntimeInfoTrait, RuntimeInfoError, RuntimeMetadata, VolumeError, VolumeOps,
};
pub use types::{Endpoint, RuntimeConfig, RuntimeInfo, RuntimeType};
