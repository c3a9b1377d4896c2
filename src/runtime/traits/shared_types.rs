// ABOUTME: Shared types used across runtime traits.
// ABOUTME: Includes load outcomes, helper container specs, and runtime metadata.

use serde::Serialize;

/// One record of the engine's image-load response stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum LoadMessage {
    /// Progress or result line, e.g. `Loaded image: nginx:1.25`.
    Stream(String),
    /// Error reported by the engine for this archive.
    Error(String),
}

impl LoadMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, LoadMessage::Error(_))
    }
}

/// Result of loading one archive into the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    /// True when at least one non-error record came back.
    pub loaded: bool,
    pub messages: Vec<LoadMessage>,
}

impl LoadOutcome {
    /// Fold response records into an outcome; any stream record counts as loaded.
    pub fn from_messages(messages: Vec<LoadMessage>) -> Self {
        let loaded = messages.iter().any(|m| !m.is_error());
        Self { loaded, messages }
    }
}

/// Throwaway container that runs one `tar` command against a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperSpec {
    pub image: String,
    pub volume: String,
    /// Absolute host directory mounted at [`HelperSpec::BACKUP_DIR`].
    pub host_dir: String,
    /// Archive file name inside `host_dir`.
    pub file_name: String,
}

impl HelperSpec {
    pub const VOLUME_DIR: &'static str = "/volume";
    pub const BACKUP_DIR: &'static str = "/backup";

    fn archive_in_container(&self) -> String {
        format!("{}/{}", Self::BACKUP_DIR, self.file_name)
    }

    /// `tar czf /backup/<file> -C /volume .`
    pub fn backup_command(&self) -> Vec<String> {
        vec![
            "tar".to_string(),
            "czf".to_string(),
            self.archive_in_container(),
            "-C".to_string(),
            Self::VOLUME_DIR.to_string(),
            ".".to_string(),
        ]
    }

    /// `tar xzf /backup/<file> -C /volume`
    pub fn restore_command(&self) -> Vec<String> {
        vec![
            "tar".to_string(),
            "xzf".to_string(),
            self.archive_in_container(),
            "-C".to_string(),
            Self::VOLUME_DIR.to_string(),
        ]
    }

    /// Bind mounts; the volume is read-only while backing up.
    pub fn binds(&self, read_only_volume: bool) -> Vec<String> {
        let mode = if read_only_volume { ":ro" } else { "" };
        vec![
            format!("{}:{}{}", self.volume, Self::VOLUME_DIR, mode),
            format!("{}:{}", self.host_dir, Self::BACKUP_DIR),
        ]
    }
}

/// Runtime metadata information.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Runtime name (e.g., "Docker", "Podman").
    pub name: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}
