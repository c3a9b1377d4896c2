// ABOUTME: Runtime type definitions for Docker and Podman.
// ABOUTME: Includes the engine kind, the detected socket, and the config override.

use serde::{Deserialize, Serialize};

pub(crate) const ROOTFUL_PODMAN_SOCKET: &str = "/run/podman/podman.sock";
pub(crate) const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// The container engine kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl RuntimeType {
    /// System-wide socket used when only the engine kind is configured.
    pub fn default_socket(self) -> &'static str {
        match self {
            RuntimeType::Docker => DOCKER_SOCKET,
            RuntimeType::Podman => ROOTFUL_PODMAN_SOCKET,
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// Where the engine API is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Path to the engine's Unix socket.
    Socket(String),
    /// Non-unix `DOCKER_HOST` address, left to the client's own env handling.
    Host(String),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Socket(path) => write!(f, "{path}"),
            Endpoint::Host(address) => write!(f, "{address}"),
        }
    }
}

/// Detected runtime information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub runtime_type: RuntimeType,
    pub endpoint: Endpoint,
}

/// `runtime:` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    /// Explicit engine kind (overrides auto-detection).
    pub runtime: Option<RuntimeType>,
    /// Explicit socket path (overrides the default for the kind).
    pub socket: Option<String>,
}
