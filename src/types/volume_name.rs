// ABOUTME: Validated volume name as accepted by Docker and Podman.
// ABOUTME: Used when a volume name is recovered from an archive file name.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeNameError {
    #[error("volume name cannot be empty")]
    Empty,

    #[error("volume name must start with a letter or digit")]
    InvalidStart,

    #[error("invalid character in volume name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeName(String);

impl VolumeName {
    /// Validate against the engine rule `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
    pub fn new(value: &str) -> Result<Self, VolumeNameError> {
        let mut chars = value.chars();
        let first = chars.next().ok_or(VolumeNameError::Empty)?;
        if !first.is_ascii_alphanumeric() {
            return Err(VolumeNameError::InvalidStart);
        }

        for c in chars {
            if !c.is_ascii_alphanumeric() && c != '_' && c != '.' && c != '-' {
                return Err(VolumeNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
