// ABOUTME: Phantom-typed identifiers for engine objects.
// ABOUTME: Keeps image content ids and helper container ids apart at compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
pub enum ImageMarker {}
pub enum ContainerMarker {}

/// Number of hex characters shown for an abbreviated id.
pub const SHORT_ID_LEN: usize = 12;

/// Digest algorithm prefix the engine puts in front of content ids.
const DIGEST_PREFIX: &str = "sha256:";

/// A type-safe identifier for one kind of engine object.
#[must_use = "IDs reference engine objects and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The first 12 characters, or the whole id when it is shorter.
    pub fn short(&self) -> &str {
        self.value.get(..SHORT_ID_LEN).unwrap_or(&self.value)
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl Id<ImageMarker> {
    /// Build an image id from the engine form, dropping a `sha256:` prefix.
    pub fn from_digest(value: &str) -> Self {
        Self::new(value.strip_prefix(DIGEST_PREFIX).unwrap_or(value))
    }
}

// T is only a marker, so these impls must not require bounds on it.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Id").field("value", &self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

pub type ImageId = Id<ImageMarker>;
pub type ContainerId = Id<ContainerMarker>;
