// ABOUTME: Configuration types and parsing for wocker.yml.
// ABOUTME: Handles discovery, the WOCKER_CONFIG override, defaults and validation.

mod init;

pub use init::init_config;

use crate::archive::{IMAGE_EXTENSION, SaveFailurePolicy, VOLUME_EXTENSION};
use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "wocker.yml";
pub const CONFIG_FILENAME_ALT: &str = "wocker.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".wocker/config.yml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WOCKER_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory archives are saved into.
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub images: ImageArchiveConfig,

    #[serde(default)]
    pub volumes: VolumeArchiveConfig,

    #[serde(default)]
    pub on_save_error: SaveFailurePolicy,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageArchiveConfig {
    #[serde(default = "default_image_extension")]
    pub extension: String,
}

impl Default for ImageArchiveConfig {
    fn default() -> Self {
        Self {
            extension: default_image_extension(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeArchiveConfig {
    #[serde(default = "default_volume_extension")]
    pub extension: String,

    /// Image providing `tar` for the helper containers.
    #[serde(default = "default_helper_image")]
    pub helper_image: String,
}

impl Default for VolumeArchiveConfig {
    fn default() -> Self {
        Self {
            extension: default_volume_extension(),
            helper_image: default_helper_image(),
        }
    }
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_image_extension() -> String {
    IMAGE_EXTENSION.to_string()
}

fn default_volume_extension() -> String {
    VOLUME_EXTENSION.to_string()
}

fn default_helper_image() -> String {
    "busybox".to_string()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_dir: default_archive_dir(),
            runtime: RuntimeConfig::default(),
            images: ImageArchiveConfig::default(),
            volumes: VolumeArchiveConfig::default(),
            on_save_error: SaveFailurePolicy::default(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty or comment-only file means "all defaults".
        let config: Self = match serde_yaml::from_str::<Option<Self>>(yaml)? {
            Some(config) => config,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::from_yaml(&content)
    }

    /// Find a config file in `dir`; no file means defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Load from `explicit`, else `$WOCKER_CONFIG`, else discover in `dir`.
    ///
    /// A named file that does not exist is an error; a missing discovered
    /// file is not.
    pub fn resolve(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match named {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => Err(Error::ConfigNotFound(path)),
            None => Self::discover(dir),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.images.extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidConfig(
                "images.extension cannot be empty".to_string(),
            ));
        }
        if self.volumes.extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidConfig(
                "volumes.extension cannot be empty".to_string(),
            ));
        }
        if self.volumes.helper_image.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "volumes.helper_image cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
