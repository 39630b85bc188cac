//! Texture-independent palette showing the corner colours of every atlas tile

use crate::io::configuration::{CORNER_PALETTE, TILES_PER_SIDE};
use crate::io::error::{Result, invalid_parameter};
use crate::synthesis::packing::PackingTable;
use image::{Rgb, RgbImage};

/// Generate a palette map of `resolution` x `resolution` pixels
///
/// The map follows the atlas layout: cell `i` is split into quadrants painted
/// with the palette colour of each corner of tile `i`, so an index map value
/// can be read off the palette directly.
///
/// # Errors
///
/// Returns an error if the resolution is zero
pub fn generate_palette_map(resolution: u32) -> Result<RgbImage> {
    if resolution == 0 {
        return Err(invalid_parameter(
            "resolution",
            &resolution,
            &"must be positive",
        ));
    }
    let table = PackingTable::new();
    let half_cells = 2 * TILES_PER_SIDE as u64;

    Ok(RgbImage::from_fn(resolution, resolution, |x, y| {
        let column = u64::from(x) * half_cells / u64::from(resolution);
        let row = u64::from(y) * half_cells / u64::from(resolution);
        let tile_index = (row / 2) as usize * TILES_PER_SIDE + (column / 2) as usize;

        let color = table
            .corners(tile_index)
            .map_or(0, |corners| corners.quadrant(row % 2 == 1, column % 2 == 1));
        Rgb(CORNER_PALETTE
            .get(usize::from(color))
            .copied()
            .unwrap_or([0, 0, 0]))
    }))
}
