//! Wang tile synthesis engine internals
//!
//! This module contains everything the engine computes:
//! - Corner packing of the tile atlas
//! - Packed corner generation from source patches
//! - Graph cut constraints and the max-flow seam search
//! - Tile set, index map and palette map generation

/// Per-tile graph cut constraint layout
pub mod constraints;
/// Packed corner atlas from coloured source patches
pub mod corners;
/// Max-flow minimum cut on a pixel grid
pub mod graphcut;
/// Texture-independent tile index map
pub mod indexmap;
/// Corner packing table
pub mod packing;
/// Texture-independent corner colour palette
pub mod palette;
/// Tile set synthesis
pub mod wangtiles;

pub use wangtiles::{SynthesisConfig, TileSynthesis, WangTileSynthesizer};
