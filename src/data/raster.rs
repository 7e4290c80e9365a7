use std::path::Path;

use eframe::egui::ColorImage;

use crate::error::{CuratorError, Result};

/// Decode an image file into an RGBA raster egui can upload as a texture.
///
/// Grayscale masks and 16-bit images are converted to 8-bit RGBA.
pub fn decode(path: &Path) -> Result<ColorImage> {
    let img = image::open(path).map_err(|source| CuratorError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
