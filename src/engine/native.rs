//! In-process engine honouring the same buffer contract as the executable

use crate::engine::SynthesisEngine;
use crate::engine::invocation::Invocation;
use crate::engine::mode::Mode;
use crate::io::buffer::{RawBuffer, decode, encode};
use crate::io::configuration::{DUPLICATED_MASK_CHANNEL, INDEX_MAP_SEED};
use crate::io::error::{Result, WangError, invalid_parameter};
use crate::synthesis::indexmap::generate_index_map;
use crate::synthesis::palette::generate_palette_map;
use crate::synthesis::{SynthesisConfig, WangTileSynthesizer};
use image::{Rgb, RgbImage};
use log::info;

/// Engine running synthesis on the calling thread (graph cuts use the rayon pool)
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine {
    config: SynthesisConfig,
}

impl NativeEngine {
    /// Engine with the given synthesis settings
    pub const fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Synthesis settings
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Produce the output buffers of `mode` in manifest order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A tile mode is missing its texture or the texture side differs from
    ///   the resolution
    /// - The resolution or debug tile is invalid for the mode
    /// - Synthesis fails
    pub fn execute(
        &self,
        mode: Mode,
        resolution: u32,
        texture: Option<&RgbImage>,
        debug_tile: Option<usize>,
    ) -> Result<Vec<RawBuffer>> {
        if debug_tile.is_some() && !mode.supports_debug_tile() {
            return Err(WangError::DebugTileUnsupported { mode: mode.name() });
        }

        match mode {
            Mode::Index => {
                info!("generating index map at {resolution}x{resolution}");
                Ok(vec![encode(&generate_index_map(resolution, INDEX_MAP_SEED)?)])
            }
            Mode::Palette => {
                info!("generating palette map at {resolution}x{resolution}");
                Ok(vec![encode(&generate_palette_map(resolution)?)])
            }
            Mode::LegacyTiles | Mode::Tiles | Mode::TilesCorners | Mode::TilesCornersConstraints => {
                let texture = texture.ok_or_else(|| {
                    invalid_parameter("texture", &"none", &format!("mode {mode} needs a texture"))
                })?;
                if texture.dimensions() != (resolution, resolution) {
                    return Err(WangError::DimensionMismatch {
                        expected: (resolution, resolution),
                        actual: texture.dimensions(),
                    });
                }

                info!("synthesising {mode} at resolution {resolution}");
                let result = WangTileSynthesizer::new(texture, self.config)?
                    .with_debug_tile(debug_tile)?
                    .synthesize()?;

                let tiles = encode(&result.tiles);
                Ok(match mode {
                    Mode::TilesCorners => vec![
                        tiles,
                        encode(&result.corner_pack_rgb(DUPLICATED_MASK_CHANNEL)),
                    ],
                    Mode::TilesCornersConstraints => vec![
                        tiles,
                        encode(&result.corner_pack_rgba()),
                        encode(&result.constraints.to_image()),
                    ],
                    _ => vec![tiles],
                })
            }
        }
    }
}

impl SynthesisEngine for NativeEngine {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let mode = invocation.mode();
        let resolution = invocation.resolution();

        let texture = match invocation.inputs().first() {
            Some(path) if mode.requires_texture() => {
                Some(decode::<Rgb<u8>>(RawBuffer::read(path)?, resolution)?)
            }
            _ => None,
        };

        let buffers = self.execute(mode, resolution, texture.as_ref(), invocation.debug_tile())?;
        for (buffer, path) in buffers.iter().zip(invocation.outputs()) {
            buffer.write(path)?;
        }
        Ok(())
    }
}
