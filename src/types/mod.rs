// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent id confusion at compile time.

mod id;
mod volume_name;

pub use id::{ContainerId, Id, ImageId, SHORT_ID_LEN};
pub use volume_name::{VolumeName, VolumeNameError};
