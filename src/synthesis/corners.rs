//! Packed corner atlas assembled from coloured patches of the source texture

use crate::io::configuration::{NUM_COLORS, TILES_PER_SIDE};
use crate::io::error::{Result, WangError, invalid_parameter};
use crate::synthesis::packing::PackingTable;
use image::{Rgb, RgbImage};

/// Square region of the source texture standing for one corner colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Side length in pixels
    pub size: u32,
}

/// Select one tile-sized patch per corner colour
///
/// Colour 0 samples the top-left corner of the texture and colour 1 the
/// bottom-right corner, keeping the two as far apart as possible.
///
/// # Errors
///
/// Returns an error if the resolution is not a multiple of the atlas size
pub fn pick_colored_patches(resolution: u32) -> Result<[Patch; NUM_COLORS]> {
    let tiles = TILES_PER_SIDE as u32;
    let size = resolution / tiles;
    if size == 0 || size * tiles != resolution {
        return Err(invalid_parameter(
            "resolution",
            &resolution,
            &format!("must be a positive multiple of {tiles}"),
        ));
    }

    let far = resolution - size;
    Ok([Patch { x: 0, y: 0, size }, Patch { x: far, y: far, size }])
}

/// Build the packed corner atlas
///
/// Rows grow northwards: the lower half of a tile in image space holds its
/// north corners, matching the row order of the packing table.
///
/// Each quadrant of a tile is copied from the diagonally opposite quadrant of
/// its corner colour's patch, so the patch centre lands on the tile corner
/// and every tile edge matches any neighbour with the same corner colours.
///
/// # Errors
///
/// Returns an error if the source is not square or its resolution does not
/// divide into the atlas
pub fn generate_packed_corners(source: &RgbImage, table: &PackingTable) -> Result<RgbImage> {
    let (width, height) = source.dimensions();
    if width != height {
        return Err(WangError::Shape { width, height });
    }
    let patches = pick_colored_patches(width)?;
    let tile_size = width / TILES_PER_SIDE as u32;
    let half = tile_size / 2;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let tile_index = (y / tile_size) as usize * TILES_PER_SIDE + (x / tile_size) as usize;
        let (local_x, local_y) = (x % tile_size, y % tile_size);
        let color = table
            .corners(tile_index)
            .map_or(0, |corners| corners.quadrant(local_y >= half, local_x >= half));

        patches
            .get(usize::from(color))
            .and_then(|patch| {
                source.get_pixel_checked(
                    patch.x + (local_x + half) % tile_size,
                    patch.y + (local_y + half) % tile_size,
                )
            })
            .copied()
            .unwrap_or(Rgb([0, 0, 0]))
    }))
}
