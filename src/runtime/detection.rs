// ABOUTME: Runtime detection logic for the local system.
// ABOUTME: Honors explicit config, then DOCKER_HOST, then checks Podman sockets before Docker.

use super::types::{
    DOCKER_SOCKET, Endpoint, ROOTFUL_PODMAN_SOCKET, RuntimeConfig, RuntimeInfo, RuntimeType,
};
use std::path::Path;

/// Environment variable the Docker CLI uses to point at a daemon.
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

const UNIX_SCHEME: &str = "unix://";

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("configured socket does not exist: {0}")]
    SocketMissing(String),
}

/// Detect the container runtime on the local system.
///
/// An explicit `runtime`/`socket` in `config` wins, then `$DOCKER_HOST`.
/// Otherwise the order is:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local(config: Option<&RuntimeConfig>) -> Result<RuntimeInfo, DetectionError> {
    let chosen = config
        .and_then(explicit_runtime)
        .or_else(|| docker_host_runtime(std::env::var(DOCKER_HOST_ENV).ok().as_deref()));

    if let Some(info) = chosen {
        return match &info.endpoint {
            Endpoint::Socket(path) if !Path::new(path).exists() => {
                Err(DetectionError::SocketMissing(path.clone()))
            }
            _ => Ok(info),
        };
    }

    probe(&candidate_sockets(get_uid().as_deref()), |path| {
        Path::new(path).exists()
    })
}

fn explicit_runtime(config: &RuntimeConfig) -> Option<RuntimeInfo> {
    match (config.runtime, config.socket.as_ref()) {
        (Some(runtime_type), socket) => Some(RuntimeInfo {
            runtime_type,
            endpoint: Endpoint::Socket(
                socket
                    .cloned()
                    .unwrap_or_else(|| runtime_type.default_socket().to_string()),
            ),
        }),
        // A bare socket is assumed to speak for Docker; Podman answers the same API.
        (None, Some(socket)) => Some(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            endpoint: Endpoint::Socket(socket.clone()),
        }),
        (None, None) => None,
    }
}

/// `unix://` hosts become a socket path; anything else is handed to the client as is.
fn docker_host_runtime(host: Option<&str>) -> Option<RuntimeInfo> {
    let host = host.map(str::trim).filter(|h| !h.is_empty())?;

    let endpoint = match host.strip_prefix(UNIX_SCHEME) {
        Some(path) => Endpoint::Socket(path.to_string()),
        None => Endpoint::Host(host.to_string()),
    };

    Some(RuntimeInfo {
        runtime_type: RuntimeType::Docker,
        endpoint,
    })
}

fn candidate_sockets(uid: Option<&str>) -> Vec<(RuntimeType, String)> {
    let mut candidates = Vec::with_capacity(3);
    if let Some(uid) = uid {
        candidates.push((
            RuntimeType::Podman,
            format!("/run/user/{}/podman/podman.sock", uid),
        ));
    }
    candidates.push((RuntimeType::Podman, ROOTFUL_PODMAN_SOCKET.to_string()));
    candidates.push((RuntimeType::Docker, DOCKER_SOCKET.to_string()));
    candidates
}

fn probe(
    candidates: &[(RuntimeType, String)],
    exists: impl Fn(&str) -> bool,
) -> Result<RuntimeInfo, DetectionError> {
    candidates
        .iter()
        .find(|(_, path)| exists(path))
        .map(|(runtime_type, path)| RuntimeInfo {
            runtime_type: *runtime_type,
            endpoint: Endpoint::Socket(path.clone()),
        })
        .ok_or(DetectionError::NoRuntimeFound)
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rootless_podman_is_checked_first() {
        let candidates = candidate_sockets(Some("1000"));
        assert_eq!(candidates[0].1, "/run/user/1000/podman/podman.sock");
        assert_eq!(candidates.last().unwrap().1, DOCKER_SOCKET);
    }

    #[test]
    fn probe_picks_first_existing_socket() {
        let candidates = candidate_sockets(Some("1000"));
        let info = probe(&candidates, |p| p == DOCKER_SOCKET).unwrap();
        assert_eq!(info.runtime_type, RuntimeType::Docker);

        let info = probe(&candidates, |_| true).unwrap();
        assert_eq!(info.runtime_type, RuntimeType::Podman);
    }

    #[test]
    fn probe_without_sockets_fails() {
        let candidates = candidate_sockets(None);
        assert!(matches!(
            probe(&candidates, |_| false),
            Err(DetectionError::NoRuntimeFound)
        ));
    }

    #[test]
    fn explicit_kind_uses_default_socket() {
        let config = RuntimeConfig {
            runtime: Some(RuntimeType::Podman),
            socket: None,
        };
        let info = explicit_runtime(&config).unwrap();
        assert_eq!(
            info.endpoint,
            Endpoint::Socket(ROOTFUL_PODMAN_SOCKET.to_string())
        );
    }

    #[test]
    fn explicit_socket_without_kind() {
        let config = RuntimeConfig {
            runtime: None,
            socket: Some("/tmp/engine.sock".to_string()),
        };
        let info = explicit_runtime(&config).unwrap();
        assert_eq!(info.runtime_type, RuntimeType::Docker);
        assert_eq!(info.endpoint, Endpoint::Socket("/tmp/engine.sock".to_string()));
    }

    #[test]
    fn missing_configured_socket_is_reported() {
        let config = RuntimeConfig {
            runtime: None,
            socket: Some("/nonexistent/wocker-test.sock".to_string()),
        };
        assert!(matches!(
            detect_local(Some(&config)),
            Err(DetectionError::SocketMissing(_))
        ));
    }

    #[test]
    fn docker_host_parsing() {
        assert_eq!(docker_host_runtime(None), None);
        assert_eq!(docker_host_runtime(Some("  ")), None);

        let info = docker_host_runtime(Some("unix:///srv/docker.sock")).unwrap();
        assert_eq!(info.endpoint, Endpoint::Socket("/srv/docker.sock".to_string()));

        let info = docker_host_runtime(Some("tcp://10.0.0.5:2376")).unwrap();
        assert_eq!(info.endpoint, Endpoint::Host("tcp://10.0.0.5:2376".to_string()));
    }

    #[test]
    fn docker_host_unix_socket_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        std::fs::write(&socket, b"").unwrap();
        let host = format!("unix://{}", socket.display());

        temp_env::with_var(DOCKER_HOST_ENV, Some(&host), || {
            let info = detect_local(None).unwrap();
            assert_eq!(info.runtime_type, RuntimeType::Docker);
            assert_eq!(
                info.endpoint,
                Endpoint::Socket(socket.display().to_string())
            );
        });
    }

    #[test]
    fn docker_host_tcp_skips_socket_probing() {
        temp_env::with_var(DOCKER_HOST_ENV, Some("tcp://10.0.0.5:2376"), || {
            let info = detect_local(Some(&RuntimeConfig::default())).unwrap();
            assert_eq!(info.endpoint, Endpoint::Host("tcp://10.0.0.5:2376".to_string()));
        });
    }

    #[test]
    fn docker_host_missing_socket_is_reported() {
        temp_env::with_var(
            DOCKER_HOST_ENV,
            Some("unix:///nonexistent/wocker-host.sock"),
            || {
                assert!(matches!(
                    detect_local(None),
                    Err(DetectionError::SocketMissing(_))
                ));
            },
        );
    }

    #[test]
    fn explicit_config_beats_docker_host() {
        let config = RuntimeConfig {
            runtime: Some(RuntimeType::Podman),
            socket: Some("/nonexistent/podman.sock".to_string()),
        };

        temp_env::with_var(DOCKER_HOST_ENV, Some("tcp://10.0.0.5:2376"), || {
            match detect_local(Some(&config)) {
                Err(DetectionError::SocketMissing(path)) => {
                    assert_eq!(path, "/nonexistent/podman.sock")
                }
                other => panic!("expected configured socket to win, got {other:?}"),
            }
        });
    }
}
