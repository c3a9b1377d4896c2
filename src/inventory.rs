// ABOUTME: Read-only snapshot records for images and volumes known to the engine.
// ABOUTME: Fetched once per command run and never mutated afterwards.

use crate::types::ImageId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder the engine reports for missing repository or tag.
const NONE_MARKER: &str = "<none>";

/// One `repository:tag` view of an image, as `docker images` shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    /// Empty for untagged (dangling) images.
    pub repository: String,
    /// Empty for untagged (dangling) images.
    pub tag: String,
    pub id: ImageId,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

impl ImageEntry {
    /// Flatten one engine image summary into one entry per `repository:tag`.
    ///
    /// `<none>:<none>` references are dropped; an image left without any
    /// usable reference becomes a single untagged entry.
    pub fn from_summary(repo_tags: &[String], id: &str, created: i64, size: i64) -> Vec<Self> {
        let id = ImageId::from_digest(id);
        let created_at = DateTime::from_timestamp(created, 0).unwrap_or_default();
        let size_bytes = u64::try_from(size).unwrap_or(0);

        let mut entries: Vec<Self> = repo_tags
            .iter()
            .filter_map(|reference| split_reference(reference))
            .map(|(repository, tag)| Self {
                repository,
                tag,
                id: id.clone(),
                created_at,
                size_bytes,
            })
            .collect();

        if entries.is_empty() {
            entries.push(Self {
                repository: String::new(),
                tag: String::new(),
                id,
                created_at,
                size_bytes,
            });
        }

        entries
    }

    /// Both halves of `repository:tag` are known.
    pub fn is_tagged(&self) -> bool {
        !self.repository.is_empty() && !self.tag.is_empty()
    }

    /// Reference handed to the engine when exporting this image.
    ///
    /// Anything short of `repository:tag` is exported by id; a bare repository
    /// would resolve to `:latest`.
    pub fn reference(&self) -> String {
        if self.is_tagged() {
            format!("{}:{}", self.repository, self.tag)
        } else {
            self.id.to_string()
        }
    }
}

/// Split `repository:tag` at the last colon; the tag never contains a slash,
/// which keeps registry ports (`host:5000/app`) inside the repository.
fn split_reference(reference: &str) -> Option<(String, String)> {
    let (repository, tag) = match reference.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo, tag),
        _ => (reference, ""),
    };

    if repository.is_empty() || repository == NONE_MARKER {
        return None;
    }

    let tag = if tag == NONE_MARKER { "" } else { tag };
    Some((repository.to_string(), tag.to_string()))
}

/// A named volume; the name is its unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeEntry {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
}
