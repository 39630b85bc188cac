//! Loading source textures and writing artifact images

use crate::io::error::{Result, WangError, WithPath};
use image::{ImageBuffer, PixelWithColorType, RgbImage};
use std::path::Path;

/// Load a texture and convert it to RGB
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image is not square
pub fn load_square_texture(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| WangError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (width, height) = (img.width(), img.height());
    if width != height {
        return Err(WangError::Shape { width, height });
    }

    Ok(img.to_rgb8())
}

/// Save an artifact, creating parent directories as needed
///
/// The format is chosen from the path extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_image<P>(image: &ImageBuffer<P, Vec<u8>>, path: &Path) -> Result<()>
where
    P: PixelWithColorType<Subpixel = u8>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    image.save(path).map_err(|e| WangError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
