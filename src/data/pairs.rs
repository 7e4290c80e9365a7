use std::path::Path;

use crate::error::{CuratorError, Result};

// ---------------------------------------------------------------------------
// Pair – one image file and its mask, matched by position
// ---------------------------------------------------------------------------

/// Borrowed view of the pair under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    pub image: &'a str,
    pub mask: &'a str,
}

impl Pair<'_> {
    /// Whether both files share the same stem (`a.png` / `a.tif`).
    pub fn stems_match(&self) -> bool {
        Path::new(self.image).file_stem() == Path::new(self.mask).file_stem()
    }
}

// ---------------------------------------------------------------------------
// PairList – the two sorted listings plus the cursor
// ---------------------------------------------------------------------------

/// Two independently sorted file listings treated as positionally paired.
///
/// `images.len() == masks.len()` always holds, and `cursor < len()` whenever
/// the list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairList {
    images: Vec<String>,
    masks: Vec<String>,
    cursor: usize,
}

impl PairList {
    /// Pair up two listings. Fails when their lengths differ.
    pub fn new(images: Vec<String>, masks: Vec<String>) -> Result<Self> {
        if images.len() != masks.len() {
            return Err(CuratorError::Precondition {
                images: images.len(),
                masks: masks.len(),
            });
        }
        Ok(PairList {
            images,
            masks,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<Pair<'_>> {
        self.get(self.cursor)
    }

    pub fn get(&self, position: usize) -> Option<Pair<'_>> {
        Some(Pair {
            image: self.images.get(position)?,
            mask: self.masks.get(position)?,
        })
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn masks(&self) -> &[String] {
        &self.masks
    }

    /// Step forward, wrapping from the last pair to the first.
    pub fn advance(&mut self) {
        if !self.is_empty() {
            self.cursor = (self.cursor + 1) % self.len();
        }
    }

    /// Step back, wrapping from the first pair to the last.
    pub fn retreat(&mut self) {
        if !self.is_empty() {
            self.cursor = (self.cursor + self.len() - 1) % self.len();
        }
    }

    /// Drop the pair under the cursor and return its file names.
    ///
    /// The following pairs shift left, so the cursor stays put unless it fell
    /// off the end, in which case it wraps to 0.
    pub fn remove_current(&mut self) -> Option<(String, String)> {
        if self.is_empty() {
            return None;
        }
        let image = self.images.remove(self.cursor);
        let mask = self.masks.remove(self.cursor);
        self.cursor = if self.is_empty() {
            0
        } else {
            self.cursor % self.len()
        };
        Some((image, mask))
    }

    /// Positions whose image and mask names have different stems.
    pub fn mismatched_positions(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.get(i).is_some_and(|p| !p.stems_match()))
            .collect()
    }
}
