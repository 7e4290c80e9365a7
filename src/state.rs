use std::path::{Path, PathBuf};

use crate::config::CuratorConfig;
use crate::data::archive::{self, CacheDirs};
use crate::data::listing::list_files;
use crate::data::pairs::{Pair, PairList};
use crate::error::{CuratorError, Result};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One logical user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    /// Remove the current pair, archiving it first when a cache is set.
    Commit,
}

/// What a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (e.g. a failed commit or an empty dataset).
    Unchanged,
    /// The cursor now points at a different pair.
    Moved,
    /// The current pair was removed and pairs remain.
    Removed,
    /// The last pair was removed; the session is over.
    Finished,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The whole curation session, independent of rendering.
pub struct CuratorState {
    image_folder: PathBuf,
    mask_folder: PathBuf,
    cache: Option<CacheDirs>,
    pairs: PairList,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl CuratorState {
    /// Scan both folders and pair their files by sorted position.
    ///
    /// Fails before touching the filesystem if the counts differ (or, with
    /// strict pairing, if any pair's stems differ). Creates the cache folders
    /// afterwards when a cache root is configured.
    pub fn open(config: &CuratorConfig) -> Result<Self> {
        let images = list_files(&config.image_folder)?;
        let masks = list_files(&config.mask_folder)?;
        let pairs = PairList::new(images, masks)?;

        for position in pairs.mismatched_positions() {
            let Some(pair) = pairs.get(position) else {
                continue;
            };
            if config.strict_pairing {
                return Err(CuratorError::Pairing {
                    position,
                    image: pair.image.to_string(),
                    mask: pair.mask.to_string(),
                });
            }
            log::warn!(
                "Pair {position} may be mismatched: image '{}' vs mask '{}'",
                pair.image,
                pair.mask
            );
        }

        let cache = config
            .cache_root
            .as_deref()
            .map(CacheDirs::ensure)
            .transpose()?;

        log::info!(
            "Loaded {} pairs from {} and {}{}",
            pairs.len(),
            config.image_folder.display(),
            config.mask_folder.display(),
            match &config.cache_root {
                Some(root) => format!(", archiving to {}", root.display()),
                None => String::new(),
            }
        );

        Ok(CuratorState {
            image_folder: config.image_folder.clone(),
            mask_folder: config.mask_folder.clone(),
            cache,
            pairs,
            status_message: None,
        })
    }

    pub fn pairs(&self) -> &PairList {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn current(&self) -> Option<Pair<'_>> {
        self.pairs.current()
    }

    /// Full paths of the current image and mask.
    pub fn current_paths(&self) -> Option<(PathBuf, PathBuf)> {
        let pair = self.current()?;
        Some((
            self.image_folder.join(pair.image),
            self.mask_folder.join(pair.mask),
        ))
    }

    pub fn cache(&self) -> Option<&CacheDirs> {
        self.cache.as_ref()
    }

    /// Run one command to completion.
    ///
    /// Commit failures are logged and put in `status_message` rather than
    /// returned; the outcome tells the caller whether to redraw or close.
    /// Messages belong to the pair they were raised on, so they are cleared
    /// only when the displayed pair changes.
    pub fn apply(&mut self, command: Command) -> Outcome {
        if self.pairs.is_empty() {
            return Outcome::Unchanged;
        }

        match command {
            Command::Advance => {
                self.pairs.advance();
                self.status_message = None;
                log::debug!("Advanced to pair {}", self.pairs.cursor());
                Outcome::Moved
            }
            Command::Retreat => {
                self.pairs.retreat();
                self.status_message = None;
                log::debug!("Went back to pair {}", self.pairs.cursor());
                Outcome::Moved
            }
            Command::Commit => match self.commit() {
                Ok(outcome) => {
                    self.status_message = None;
                    outcome
                }
                Err(e) => {
                    let partial = matches!(e, CuratorError::PartialCommit { .. });
                    let e = anyhow::Error::from(e);
                    log::error!("Commit failed: {e:#}");
                    if partial {
                        self.status_message = None;
                    }
                    self.report(format!("Error: {e:#}"));
                    if partial {
                        self.after_removal()
                    } else {
                        Outcome::Unchanged
                    }
                }
            },
        }
    }

    /// Add `msg` to the status line, keeping what is already shown.
    pub fn report(&mut self, msg: String) {
        self.status_message = match self.status_message.take() {
            Some(prev) if prev.contains(&msg) => Some(prev),
            Some(prev) => Some(format!("{prev} | {msg}")),
            None => Some(msg),
        };
    }

    /// Archive (if configured) and delete the current pair, then drop it.
    ///
    /// On error the pair stays in the session, except for
    /// [`CuratorError::PartialCommit`] where the image is already gone and the
    /// pair has been dropped.
    pub fn commit(&mut self) -> Result<Outcome> {
        let Some((image_path, mask_path)) = self.current_paths() else {
            return Ok(Outcome::Unchanged);
        };

        if let Some(cache) = &self.cache {
            let image_copy = archive::archive_file(&image_path, &cache.images)?;
            if let Err(e) = archive::archive_file(&mask_path, &cache.masks) {
                archive::discard_copy(&image_copy);
                return Err(e);
            }
        }

        archive::delete_file(&image_path)?;
        match archive::delete_file(&mask_path) {
            Ok(()) => {}
            Err(CuratorError::Filesystem { source, .. }) => {
                self.pairs.remove_current();
                return Err(CuratorError::PartialCommit {
                    removed: image_path,
                    orphan: mask_path,
                    source,
                });
            }
            Err(other) => return Err(other),
        }

        log::info!(
            "{} {} and {}",
            if self.cache.is_some() { "Archived" } else { "Deleted" },
            display_name(&image_path),
            display_name(&mask_path)
        );
        self.pairs.remove_current();
        Ok(self.after_removal())
    }

    fn after_removal(&self) -> Outcome {
        if self.pairs.is_empty() {
            log::info!("All images and masks are deleted");
            Outcome::Finished
        } else {
            Outcome::Removed
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsAction;
    use tempfile::TempDir;

    struct Fixture {
        root: TempDir,
    }

    impl Fixture {
        fn new(images: &[&str], masks: &[&str]) -> Self {
            let root = TempDir::new().unwrap();
            std::fs::create_dir(root.path().join("image")).unwrap();
            std::fs::create_dir(root.path().join("mask")).unwrap();
            for name in images {
                std::fs::write(root.path().join("image").join(name), format!("img {name}")).unwrap();
            }
            for name in masks {
                std::fs::write(root.path().join("mask").join(name), format!("mask {name}")).unwrap();
            }
            Fixture { root }
        }

        fn image(&self, name: &str) -> PathBuf {
            self.root.path().join("image").join(name)
        }

        fn mask(&self, name: &str) -> PathBuf {
            self.root.path().join("mask").join(name)
        }

        fn cache(&self) -> PathBuf {
            self.root.path().join("cache")
        }

        fn config(&self, with_cache: bool) -> CuratorConfig {
            CuratorConfig {
                image_folder: self.root.path().join("image"),
                mask_folder: self.root.path().join("mask"),
                cache_root: with_cache.then(|| self.cache()),
                strict_pairing: false,
            }
        }
    }

    fn current_image(state: &CuratorState) -> &str {
        state.current().unwrap().image
    }

    #[test]
    fn test_open_starts_at_first_pair() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png", "b.png"]);
        let state = CuratorState::open(&fx.config(false)).unwrap();
        assert_eq!(state.pairs().cursor(), 0);
        assert_eq!(state.pairs().len(), 2);
        assert!(state.cache().is_none());
    }

    #[test]
    fn test_open_count_mismatch_is_precondition_error() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png"]);
        let result = CuratorState::open(&fx.config(true));
        assert!(matches!(
            result,
            Err(CuratorError::Precondition { images: 2, masks: 1 })
        ));
        // Nothing is created when the session never starts.
        assert!(!fx.cache().exists());
    }

    #[test]
    fn test_open_creates_cache_dirs() {
        let fx = Fixture::new(&["a.png"], &["a.png"]);
        let state = CuratorState::open(&fx.config(true)).unwrap();
        assert!(fx.cache().join("images").is_dir());
        assert!(fx.cache().join("masks").is_dir());
        assert_eq!(state.cache().unwrap().masks, fx.cache().join("masks"));
    }

    #[test]
    fn test_open_strict_pairing_rejects_mismatch() {
        let fx = Fixture::new(&["a.jpg", "b.jpg"], &["a.png", "c.png"]);
        let mut config = fx.config(false);

        assert!(CuratorState::open(&config).is_ok());

        config.strict_pairing = true;
        let result = CuratorState::open(&config);
        assert!(matches!(
            result,
            Err(CuratorError::Pairing { position: 1, .. })
        ));
    }

    #[test]
    fn test_navigation_then_delete_without_cache() {
        let fx = Fixture::new(&["a.png", "b.png", "c.png"], &["a.png", "b.png", "c.png"]);
        let mut state = CuratorState::open(&fx.config(false)).unwrap();

        assert_eq!(state.apply(Command::Advance), Outcome::Moved);
        assert_eq!(current_image(&state), "b.png");
        state.apply(Command::Advance);
        assert_eq!(current_image(&state), "c.png");
        state.apply(Command::Advance);
        assert_eq!(current_image(&state), "a.png");

        assert_eq!(state.apply(Command::Commit), Outcome::Removed);
        assert!(!fx.image("a.png").exists());
        assert!(!fx.mask("a.png").exists());
        assert_eq!(state.pairs().images(), ["b.png", "c.png"]);
        assert_eq!(state.pairs().masks(), ["b.png", "c.png"]);
        assert_eq!(state.pairs().cursor(), 0);
        assert_eq!(current_image(&state), "b.png");
        assert!(!fx.cache().exists());
    }

    #[test]
    fn test_commit_with_cache_archives_then_finishes() {
        let fx = Fixture::new(&["x.png"], &["x.png"]);
        let mut state = CuratorState::open(&fx.config(true)).unwrap();

        assert_eq!(state.apply(Command::Commit), Outcome::Finished);
        assert_eq!(
            std::fs::read(fx.cache().join("images").join("x.png")).unwrap(),
            b"img x.png"
        );
        assert_eq!(
            std::fs::read(fx.cache().join("masks").join("x.png")).unwrap(),
            b"mask x.png"
        );
        assert!(!fx.image("x.png").exists());
        assert!(!fx.mask("x.png").exists());
        assert!(state.is_empty());
        assert!(state.current_paths().is_none());
    }

    #[test]
    fn test_repeated_commit_finishes_exactly_once() {
        let fx = Fixture::new(&["a.png", "b.png", "c.png"], &["a.png", "b.png", "c.png"]);
        let mut state = CuratorState::open(&fx.config(false)).unwrap();

        let outcomes: Vec<Outcome> = (0..5).map(|_| state.apply(Command::Commit)).collect();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Removed,
                Outcome::Removed,
                Outcome::Finished,
                Outcome::Unchanged,
                Outcome::Unchanged,
            ]
        );
        assert_eq!(state.apply(Command::Advance), Outcome::Unchanged);
    }

    #[test]
    fn test_commit_shrinks_both_lists_by_one() {
        let fx = Fixture::new(&["a.png", "b.png", "c.png"], &["a.png", "b.png", "c.png"]);
        let mut state = CuratorState::open(&fx.config(true)).unwrap();
        state.apply(Command::Retreat);

        let before = state.pairs().len();
        state.apply(Command::Commit);
        assert_eq!(state.pairs().images().len(), before - 1);
        assert_eq!(state.pairs().masks().len(), before - 1);
        // Removing the last pair wraps the cursor to the start.
        assert_eq!(state.pairs().cursor(), 0);
    }

    #[test]
    fn test_failed_archive_leaves_pair_in_place() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png", "b.png"]);
        let mut state = CuratorState::open(&fx.config(true)).unwrap();
        std::fs::remove_file(fx.mask("a.png")).unwrap();

        let err = state.commit().unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Filesystem {
                action: FsAction::Copy,
                ..
            }
        ));
        assert!(fx.image("a.png").exists());
        // The image copy made before the mask copy failed is gone again.
        assert!(!fx.cache().join("images").join("a.png").exists());
        assert_eq!(state.pairs().len(), 2);
        assert_eq!(current_image(&state), "a.png");
    }

    #[test]
    fn test_failed_commit_keeps_load_error() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png", "b.png"]);
        let mut state = CuratorState::open(&fx.config(false)).unwrap();
        state.report("Error: cannot decode a.png".to_string());
        std::fs::remove_file(fx.image("a.png")).unwrap();

        assert_eq!(state.apply(Command::Commit), Outcome::Unchanged);
        let msg = state.status_message.clone().unwrap();
        assert!(msg.contains("cannot decode a.png"));
        assert!(msg.contains("failed to delete"));

        // Repeating the same failure does not grow the message.
        state.apply(Command::Commit);
        assert_eq!(state.status_message.as_deref(), Some(msg.as_str()));
    }

    #[test]
    fn test_failed_commit_is_reported_in_status() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png", "b.png"]);
        let mut state = CuratorState::open(&fx.config(false)).unwrap();
        std::fs::remove_file(fx.image("a.png")).unwrap();

        assert_eq!(state.apply(Command::Commit), Outcome::Unchanged);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert!(fx.mask("a.png").exists());
        assert_eq!(state.pairs().len(), 2);

        // The next successful command clears the message.
        state.apply(Command::Advance);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_vanished_mask_is_partial_commit() {
        let fx = Fixture::new(&["a.png", "b.png"], &["a.png", "b.png"]);
        let mut state = CuratorState::open(&fx.config(false)).unwrap();
        std::fs::remove_file(fx.mask("a.png")).unwrap();

        let err = state.commit().unwrap_err();
        match err {
            CuratorError::PartialCommit { removed, orphan, .. } => {
                assert_eq!(removed, fx.image("a.png"));
                assert_eq!(orphan, fx.mask("a.png"));
            }
            other => panic!("expected PartialCommit, got {other:?}"),
        }
        assert!(!fx.image("a.png").exists());
        assert_eq!(state.pairs().images(), ["b.png"]);
        assert_eq!(state.pairs().masks(), ["b.png"]);
    }
}
