// ABOUTME: Filesystem helpers for archive destinations.
// ABOUTME: Recreate semantics: an existing archive is removed, never appended to.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

/// Create a fresh, empty file at `path`, creating parent directories and
/// deleting whatever file was there before.
pub async fn recreate_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    remove_if_exists(path).await?;
    File::create(path).await
}

/// Delete the file at `path`; a missing file is not an error.
pub async fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed archive file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Absolute form of an existing directory, as the engine needs it for bind mounts.
pub async fn absolute_dir(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    fs::canonicalize(dir).await
}
