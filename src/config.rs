use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Review image/mask pairs side by side and prune the bad ones.
///
/// Right/Left arrows step through the pairs, Space removes the current pair
/// (archiving it to the cache first when one is set).
#[derive(Debug, Default, Parser)]
#[command(name = "mask-curator", version)]
pub struct CliArgs {
    /// Folder with the source images.
    pub image_dir: Option<PathBuf>,

    /// Folder with the masks, paired to images by sorted file name.
    pub mask_dir: Option<PathBuf>,

    /// Archive removed pairs into CACHE/images and CACHE/masks instead of
    /// only deleting them.
    #[arg(long, value_name = "CACHE")]
    pub cache: Option<PathBuf>,

    /// JSON file providing any of the settings above.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Refuse to start if any pair's file stems differ.
    #[arg(long)]
    pub strict_pairing: bool,
}

// ---------------------------------------------------------------------------
// JSON config file
// ---------------------------------------------------------------------------

/// On-disk settings, e.g.
///
/// ```json
/// {
///   "image_folder": "dataset/image",
///   "mask_folder": "dataset/mask",
///   "cache_root": "dataset/cache"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub image_folder: Option<PathBuf>,
    pub mask_folder: Option<PathBuf>,
    pub cache_root: Option<PathBuf>,
    #[serde(default)]
    pub strict_pairing: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratorConfig {
    pub image_folder: PathBuf,
    pub mask_folder: PathBuf,
    pub cache_root: Option<PathBuf>,
    pub strict_pairing: bool,
}

/// Settings after merging CLI and file, before asking for missing folders.
#[derive(Debug, Default, PartialEq, Eq)]
struct Partial {
    image_folder: Option<PathBuf>,
    mask_folder: Option<PathBuf>,
    cache_root: Option<PathBuf>,
    strict_pairing: bool,
}

/// Command line values win over the config file.
fn merge(cli: CliArgs, file: FileConfig) -> Partial {
    Partial {
        image_folder: cli.image_dir.or(file.image_folder),
        mask_folder: cli.mask_dir.or(file.mask_folder),
        cache_root: cli.cache.or(file.cache_root),
        strict_pairing: cli.strict_pairing || file.strict_pairing,
    }
}

impl CuratorConfig {
    /// Build the configuration from the command line, the optional config
    /// file and, for folders still missing, a native folder picker.
    pub fn resolve(cli: CliArgs) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let partial = merge(cli, file);

        let image_folder = match partial.image_folder {
            Some(dir) => dir,
            None => pick_folder("Select image folder")?,
        };
        let mask_folder = match partial.mask_folder {
            Some(dir) => dir,
            None => pick_folder("Select mask folder")?,
        };

        Ok(CuratorConfig {
            image_folder,
            mask_folder,
            cache_root: partial.cache_root,
            strict_pairing: partial.strict_pairing,
        })
    }
}

fn pick_folder(title: &str) -> Result<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .pick_folder()
        .with_context(|| format!("no folder chosen ({title})"))
}
