/// Data layer: directory listings, the paired dataset, archival and decoding.
///
/// Architecture:
/// ```text
///   image dir      mask dir
///       │              │
///       ▼              ▼
///   ┌──────────────────────┐
///   │  listing              │  regular files, sorted by name
///   └──────────────────────┘
///       │
///       ▼
///   ┌──────────────────────┐
///   │  PairList             │  images[i] ↔ masks[i], cursor
///   └──────────────────────┘
///       │                 │
///       ▼                 ▼
///   ┌──────────┐     ┌──────────┐
///   │  raster   │     │  archive  │  copy to cache / delete
///   └──────────┘     └──────────┘
/// ```

pub mod archive;
pub mod listing;
pub mod pairs;
pub mod raster;
