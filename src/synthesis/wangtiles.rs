//! Wang tile set synthesis from a single square texture
//!
//! The packed corner atlas is seamless by construction but shows the same two
//! patches everywhere. Each tile is therefore stitched from the packed
//! corners along its border and the source texture inside, with the seam
//! chosen by a per-tile graph cut at a reduced working resolution.

use crate::io::configuration::{TILE_COUNT, TILES_PER_SIDE, VISUAL_SCALE};
use crate::io::error::{Result, WangError, computation_error, invalid_parameter};
use crate::io::progress::TileProgress;
use crate::math::blend::blend_rgb;
use crate::math::mip::{downsample_by, upsample_mask_by};
use crate::synthesis::constraints::ConstraintMap;
use crate::synthesis::corners::generate_packed_corners;
use crate::synthesis::graphcut::GraphCut;
use crate::synthesis::packing::PackingTable;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use log::{debug, info};
use ndarray::Array2;
use rayon::prelude::*;

/// Engine-side tuning that does not change the wire contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Largest per-tile resolution at which graph cuts run (power of two)
    pub visual_scale: usize,
    /// Draw a progress bar over the graph cuts
    pub show_progress: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            visual_scale: VISUAL_SCALE,
            show_progress: false,
        }
    }
}

/// Everything produced by one synthesis run
#[derive(Debug, Clone)]
pub struct TileSynthesis {
    /// Final Wang tile atlas
    pub tiles: RgbImage,
    /// Packed corner atlas the tiles were stitched from
    pub corners: RgbImage,
    /// Overlay coverage of the packed corners at full resolution
    pub mask: Array2<u8>,
    /// Constraint layout used for every tile
    pub constraints: ConstraintMap,
}

impl TileSynthesis {
    /// Packed corners with the cut mask as alpha
    pub fn corner_pack_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.corners.width(), self.corners.height(), |x, y| {
            let [r, g, b] = self
                .corners
                .get_pixel_checked(x, y)
                .map_or([0, 0, 0], |p| p.0);
            Rgba([r, g, b, self.mask_at(x, y)])
        })
    }

    /// Packed corners with the cut mask written over `mask_channel`
    pub fn corner_pack_rgb(&self, mask_channel: usize) -> RgbImage {
        RgbImage::from_fn(self.corners.width(), self.corners.height(), |x, y| {
            let mut rgb = self
                .corners
                .get_pixel_checked(x, y)
                .map_or([0, 0, 0], |p| p.0);
            if let Some(channel) = rgb.get_mut(mask_channel) {
                *channel = self.mask_at(x, y);
            }
            Rgb(rgb)
        })
    }

    fn mask_at(&self, x: u32, y: u32) -> u8 {
        self.mask
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// Check that a resolution can be split into the tile atlas
///
/// # Errors
///
/// Returns an error unless the resolution is a power of two giving tiles of
/// at least two pixels
pub fn validate_tile_resolution(resolution: u32) -> Result<()> {
    let minimum = 2 * TILES_PER_SIDE as u32;
    if !resolution.is_power_of_two() || resolution < minimum {
        return Err(invalid_parameter(
            "resolution",
            &resolution,
            &format!("must be a power of two of at least {minimum}"),
        ));
    }
    Ok(())
}

/// Runs packed corner generation, graph cuts and blending for one texture
pub struct WangTileSynthesizer<'a> {
    source: &'a RgbImage,
    config: SynthesisConfig,
    debug_tile: Option<usize>,
    table: PackingTable,
}

impl<'a> WangTileSynthesizer<'a> {
    /// Prepare synthesis for a square source texture
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The texture is not square
    /// - Its resolution is not a valid tile resolution
    /// - The visual scale is not a power of two of at least 2
    pub fn new(source: &'a RgbImage, config: SynthesisConfig) -> Result<Self> {
        let (width, height) = source.dimensions();
        if width != height {
            return Err(WangError::Shape { width, height });
        }
        validate_tile_resolution(width)?;
        if !config.visual_scale.is_power_of_two() || config.visual_scale < 2 {
            return Err(invalid_parameter(
                "visual_scale",
                &config.visual_scale,
                &"must be a power of two of at least 2",
            ));
        }

        Ok(Self {
            source,
            config,
            debug_tile: None,
            table: PackingTable::new(),
        })
    }

    /// Restrict graph cuts to a single tile, leaving the others uncut
    ///
    /// # Errors
    ///
    /// Returns an error if the index is outside the atlas
    pub fn with_debug_tile(mut self, debug_tile: Option<usize>) -> Result<Self> {
        if let Some(index) = debug_tile.filter(|&index| index >= TILE_COUNT) {
            return Err(WangError::InvalidTileIndex {
                index,
                max_tiles: TILE_COUNT,
            });
        }
        self.debug_tile = debug_tile;
        Ok(self)
    }

    /// Run the full synthesis
    ///
    /// # Errors
    ///
    /// Returns an error if graph cut construction or max flow fails
    pub fn synthesize(&self) -> Result<TileSynthesis> {
        let resolution = self.source.width();
        let corners = generate_packed_corners(self.source, &self.table)?;

        let tile_size = resolution as usize / TILES_PER_SIDE;
        let visual_scale = self.config.visual_scale.min(tile_size);
        let mut iterations = 0u32;
        while (tile_size >> iterations) > visual_scale {
            iterations += 1;
        }
        let cut_size = tile_size >> iterations;
        if cut_size != visual_scale {
            return Err(computation_error(
                "synthesis",
                &format!("working tile size {cut_size} does not match visual scale {visual_scale}"),
            ));
        }
        debug!("graph cuts at {cut_size} pixels per tile after {iterations} downsamples");

        let source_small = downsample_by(self.source, iterations);
        let corners_small = downsample_by(&corners, iterations);
        let constraints = ConstraintMap::new(cut_size);
        let mask_small = self.cut_tiles(&corners_small, &source_small, &constraints)?;
        let mask = upsample_mask_by(&mask_small, iterations);

        info!("blending layers");
        let tiles = RgbImage::from_fn(resolution, resolution, |x, y| {
            let under = self.source.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
            let over = corners.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
            let coverage = mask.get((y as usize, x as usize)).copied().unwrap_or(0);
            Rgb(blend_rgb(under, over, coverage))
        });

        Ok(TileSynthesis {
            tiles,
            corners,
            mask,
            constraints,
        })
    }

    fn cut_tiles(
        &self,
        overlay: &RgbImage,
        underlay: &RgbImage,
        constraints: &ConstraintMap,
    ) -> Result<Array2<u8>> {
        let size = constraints.size();
        let selected: Vec<usize> = (0..TILE_COUNT)
            .filter(|&index| self.debug_tile.is_none_or(|debug_tile| debug_tile == index))
            .collect();
        let progress = TileProgress::new(selected.len(), self.config.show_progress);

        let cuts = selected
            .par_iter()
            .map(|&index| {
                debug!("calculating graph cut for tile {index} of {TILE_COUNT}");
                let (row, col) = (index / TILES_PER_SIDE, index % TILES_PER_SIDE);
                let origin = ((col * size) as u32, (row * size) as u32);
                let mut graph = GraphCut::new(overlay, underlay, origin, constraints)?;
                let (mask, statistics) = graph.compute_mask()?;
                progress.tile_done();
                Ok((index, mask, statistics))
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish();

        let side = size * TILES_PER_SIDE;
        let mut mask = Array2::zeros((side, side));
        for (index, tile_mask, statistics) in cuts {
            info!(
                "found max-flow for tile {index} after {} augmenting paths: {}",
                statistics.augmenting_paths, statistics.max_flow
            );
            let (row, col) = (index / TILES_PER_SIDE, index % TILES_PER_SIDE);
            for ((y, x), &value) in tile_mask.indexed_iter() {
                if let Some(cell) = mask.get_mut((row * size + y, col * size + x)) {
                    *cell = value;
                }
            }
        }
        Ok(mask)
    }
}
