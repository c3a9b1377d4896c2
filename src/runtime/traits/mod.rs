// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ImageOps, VolumeOps and RuntimeInfo.

mod image;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;
mod volume;

pub use image::{ImageError, ImageOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
pub use volume::{VolumeError, VolumeOps};

/// Every capability the CLI needs from one engine client.
pub trait FullRuntime: ImageOps + VolumeOps + RuntimeInfo {}

impl<T: ImageOps + VolumeOps + RuntimeInfo> FullRuntime for T {}
