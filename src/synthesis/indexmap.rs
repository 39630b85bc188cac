//! Texture-independent map of tile indices for laying out a tile set
//!
//! Random corner colours are drawn on a lattice one larger than the map,
//! with the last row and column wrapping to the first, so the map itself
//! tiles seamlessly. Each pixel names the atlas tile whose corners match
//! the four surrounding lattice points.

use crate::io::configuration::NUM_COLORS;
use crate::io::error::{Result, invalid_parameter};
use crate::synthesis::packing::{Corners, PackingTable};
use image::{Rgb, RgbImage};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Generate an index map of `resolution` x `resolution` tiles
///
/// Every channel of a pixel holds the atlas index of its tile. The same seed
/// always yields the same map.
///
/// # Errors
///
/// Returns an error if the resolution is zero
pub fn generate_index_map(resolution: u32, seed: u64) -> Result<RgbImage> {
    if resolution == 0 {
        return Err(invalid_parameter(
            "resolution",
            &resolution,
            &"must be positive",
        ));
    }
    let side = resolution as usize;
    let table = PackingTable::new();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut lattice = Array2::<u8>::zeros((side + 1, side + 1));
    for y in 0..side {
        for x in 0..side {
            if let Some(cell) = lattice.get_mut((y, x)) {
                *cell = rng.random_range(0..NUM_COLORS as u8);
            }
        }
    }
    for y in 0..side {
        let wrapped = lattice.get((y, 0)).copied().unwrap_or(0);
        if let Some(cell) = lattice.get_mut((y, side)) {
            *cell = wrapped;
        }
    }
    for x in 0..=side {
        let wrapped = lattice.get((0, x)).copied().unwrap_or(0);
        if let Some(cell) = lattice.get_mut((side, x)) {
            *cell = wrapped;
        }
    }

    let corner = |x: usize, y: usize| lattice.get((y, x)).copied().unwrap_or(0);
    Ok(RgbImage::from_fn(resolution, resolution, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let corners = Corners::new(
            corner(x + 1, y + 1),
            corner(x + 1, y),
            corner(x, y),
            corner(x, y + 1),
        );
        let index = table.tile_index(corners).unwrap_or(0) as u8;
        Rgb([index; 3])
    }))
}
