use std::path::Path;

use crate::error::{CuratorError, Result};

/// List the names of the regular files directly inside `dir`.
///
/// Not recursive. Subdirectories are skipped and names are sorted
/// lexicographically.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let read_err = |source: std::io::Error| CuratorError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        // Follows symlinks, same as a plain `is_file` check on the path.
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non UTF-8 file name {raw:?} in {}", dir.display()),
        }
    }

    names.sort();
    Ok(names)
}
