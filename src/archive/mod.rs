// ABOUTME: Archive planning and batch execution for images and volumes.
// ABOUTME: Naming, the save/load executor, and its runtime adapters.

mod engine;
mod error;
mod executor;
mod naming;

pub use engine::{ImageArchiver, VolumeArchiver, volume_name_for};
pub use error::{ArchiveError, UsageError, require_operands};
pub use executor::{
    LoadCapable, LoadReport, LoadedItem, SaveCapable, SaveFailurePolicy, SaveReport, SavedItem,
    load_batch, save_batch,
};
pub use naming::{ArchiveName, ArchivePlan, archive_file_name, plan_archives};

/// Default extension of image archives (`docker save` output).
pub const IMAGE_EXTENSION: &str = "tar";

/// Default extension of volume archives (gzip-compressed tar).
pub const VOLUME_EXTENSION: &str = "tar.gz";
