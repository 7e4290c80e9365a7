use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong while curating a dataset.
///
/// Reaching an empty dataset is not an error; it ends the session normally.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// The two folders hold a different number of files.
    #[error("count of images ({images}) and masks ({masks}) don't match")]
    Precondition { images: usize, masks: usize },

    /// Strict pairing is on and a position pairs files with different stems.
    #[error("pair {position} is mismatched: image '{image}' vs mask '{mask}'")]
    Pairing {
        position: usize,
        image: String,
        mask: String,
    },

    #[error("cannot read directory {}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be decoded as a raster image.
    #[error("cannot decode {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A copy / delete / mkdir failed. The pair is left in place.
    #[error("failed to {action} {}", path.display())]
    Filesystem {
        action: FsAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image was deleted but its mask could not be. The pair has been
    /// dropped from the session and `orphan` is still on disk.
    #[error("deleted {} but failed to delete {}", removed.display(), orphan.display())]
    PartialCommit {
        removed: PathBuf,
        orphan: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which filesystem operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAction {
    CreateDir,
    Copy,
    Delete,
}

impl std::fmt::Display for FsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsAction::CreateDir => write!(f, "create directory"),
            FsAction::Copy => write!(f, "copy"),
            FsAction::Delete => write!(f, "delete"),
        }
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
