use std::fs::{File, FileTimes, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CuratorError, FsAction, Result};

// ---------------------------------------------------------------------------
// Cache destination
// ---------------------------------------------------------------------------

/// The `images/` and `masks/` folders that removed pairs are archived into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirs {
    pub images: PathBuf,
    pub masks: PathBuf,
}

impl CacheDirs {
    /// Make sure `root/images` and `root/masks` exist. Existing folders are fine.
    pub fn ensure(root: &Path) -> Result<Self> {
        let dirs = CacheDirs {
            images: root.join("images"),
            masks: root.join("masks"),
        };
        for dir in [&dirs.images, &dirs.masks] {
            std::fs::create_dir_all(dir).map_err(|source| CuratorError::Filesystem {
                action: FsAction::CreateDir,
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dirs)
    }
}

// ---------------------------------------------------------------------------
// File operations
// ---------------------------------------------------------------------------

/// Copy `src` into `dest_dir` under the same file name, keeping permissions
/// and access/modification times. Returns the destination path.
///
/// A copy that fails halfway is removed again.
pub fn archive_file(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let copy_err = |source: io::Error| CuratorError::Filesystem {
        action: FsAction::Copy,
        path: src.to_path_buf(),
        source,
    };

    let name = src.file_name().ok_or_else(|| {
        copy_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let dest = dest_dir.join(name);

    copy_preserving_times(src, &dest).map_err(copy_err)?;
    Ok(dest)
}

fn copy_preserving_times(src: &Path, dest: &Path) -> io::Result<()> {
    let meta = std::fs::metadata(src)?;
    let mut reader = File::open(src)?;
    let mut writer = File::create(dest)?;

    // Times go on through the open handle before permissions are applied,
    // so a read-only source still yields a fully stamped copy.
    let result = io::copy(&mut reader, &mut writer)
        .and_then(|_| writer.set_times(file_times(&meta)));
    drop(writer);
    let result = result.and_then(|()| std::fs::set_permissions(dest, meta.permissions()));

    if result.is_err() {
        let _ = std::fs::remove_file(dest);
    }
    result
}

fn file_times(meta: &Metadata) -> FileTimes {
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    times
}

/// Remove a cache copy left behind by an aborted commit.
pub fn discard_copy(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => log::debug!("Discarded cache copy {}", path.display()),
        Err(e) => log::warn!("Could not discard cache copy {}: {e}", path.display()),
    }
}

/// Permanently delete `path`.
pub fn delete_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|source| CuratorError::Filesystem {
        action: FsAction::Delete,
        path: path.to_path_buf(),
        source,
    })
}
