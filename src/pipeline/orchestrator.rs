//! Drives one engine run: validate, stage, invoke, collect
//!
//! Every check that can fail without the engine runs before anything is
//! staged, so an invalid request never spawns a process. Outputs are read
//! only after the engine reports success and are length-checked against
//! the manifest before decoding.

use crate::engine::SynthesisEngine;
use crate::engine::invocation::Invocation;
use crate::engine::mode::{BufferKind, Mode};
use crate::io::buffer::{RawBuffer, encode};
use crate::io::configuration::TILE_COUNT;
use crate::io::error::{Result, WangError, invalid_parameter};
use crate::pipeline::postprocess::{PostProcessor, TileArtifacts, ensure_composite};
use crate::pipeline::staging::StagingArea;
use image::RgbImage;
use log::{debug, info};
use std::path::PathBuf;

/// One unit of work for the engine
#[derive(Debug, Clone, Copy)]
pub enum Request<'a> {
    /// Synthesise tiles from a texture
    Tiles {
        /// Square source texture
        texture: &'a RgbImage,
        /// Tile mode to run
        mode: Mode,
        /// Restrict graph cuts to one tile
        debug_tile: Option<usize>,
    },
    /// Generate the index map
    Index {
        /// Map side
        resolution: u32,
    },
    /// Generate the palette map
    Palette {
        /// Map side
        resolution: u32,
    },
}

impl Request<'_> {
    /// Mode the request runs in
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Tiles { mode, .. } => *mode,
            Self::Index { .. } => Mode::Index,
            Self::Palette { .. } => Mode::Palette,
        }
    }

    /// Resolution passed to the engine
    pub fn resolution(&self) -> u32 {
        match self {
            Self::Tiles { texture, .. } => texture.width(),
            Self::Index { resolution } | Self::Palette { resolution } => *resolution,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Tiles {
                texture,
                mode,
                debug_tile,
            } => {
                let (width, height) = texture.dimensions();
                if width != height {
                    return Err(WangError::Shape { width, height });
                }
                if !mode.requires_texture() {
                    return Err(invalid_parameter(
                        "mode",
                        &mode,
                        &"tile requests need a tile mode",
                    ));
                }
                if let Some(index) = debug_tile {
                    if !mode.supports_debug_tile() {
                        return Err(WangError::DebugTileUnsupported { mode: mode.name() });
                    }
                    if index >= TILE_COUNT {
                        return Err(WangError::InvalidTileIndex {
                            index,
                            max_tiles: TILE_COUNT,
                        });
                    }
                }
                Ok(())
            }
            Self::Index { resolution } | Self::Palette { resolution } => {
                if resolution == 0 {
                    return Err(invalid_parameter(
                        "resolution",
                        &resolution,
                        &"must be positive",
                    ));
                }
                Ok(())
            }
        }
    }

    const fn debug_tile(&self) -> Option<usize> {
        match self {
            Self::Tiles { debug_tile, .. } => *debug_tile,
            Self::Index { .. } | Self::Palette { .. } => None,
        }
    }
}

/// Pipeline settings independent of the engine
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Directory in which staging directories are created; system temp if unset
    pub staging_root: Option<PathBuf>,
}

/// Raw buffers written by one successful engine run
#[derive(Debug, Clone)]
pub struct EngineOutputs {
    mode: Mode,
    resolution: u32,
    buffers: Vec<(BufferKind, RawBuffer)>,
}

impl EngineOutputs {
    /// Mode that produced the buffers
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Resolution of the run
    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Kinds of the buffers still held, in manifest order
    pub fn kinds(&self) -> Vec<BufferKind> {
        self.buffers.iter().map(|(kind, _)| *kind).collect()
    }

    /// Borrow a buffer by kind
    pub fn get(&self, kind: BufferKind) -> Option<&RawBuffer> {
        self.buffers
            .iter()
            .find(|(held, _)| *held == kind)
            .map(|(_, buffer)| buffer)
    }

    /// Remove and return a buffer by kind
    ///
    /// # Errors
    ///
    /// Returns an error if the run produced no buffer of that kind
    pub fn take(&mut self, kind: BufferKind) -> Result<RawBuffer> {
        let position = self
            .buffers
            .iter()
            .position(|(held, _)| *held == kind)
            .ok_or_else(|| {
                invalid_parameter(
                    "buffer",
                    &kind.file_stem(),
                    &format!("not produced by mode {}", self.mode),
                )
            })?;
        Ok(self.buffers.remove(position).1)
    }
}

/// Orchestrates engine runs and hands their outputs to the post-processor
#[derive(Debug)]
pub struct Pipeline<E> {
    engine: E,
    config: PipelineConfig,
}

impl<E: SynthesisEngine> Pipeline<E> {
    /// Pipeline over `engine` with default settings
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, PipelineConfig::default())
    }

    /// Pipeline over `engine` with explicit settings
    pub const fn with_config(engine: E, config: PipelineConfig) -> Self {
        Self { engine, config }
    }

    /// Engine used for every run
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Run the engine once and collect its raw outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is invalid (checked before anything is staged)
    /// - Staging or reading buffers fails
    /// - The engine fails or times out
    /// - An output has the wrong length for its manifest entry
    pub fn invoke(&self, request: &Request<'_>) -> Result<EngineOutputs> {
        request.validate()?;
        let mode = request.mode();
        let resolution = request.resolution();
        let manifest = mode.manifest();

        let staging = StagingArea::new(self.config.staging_root.as_deref())?;
        debug!("staging buffers in {}", staging.path().display());

        let mut inputs = Vec::with_capacity(manifest.inputs.len());
        for &kind in manifest.inputs {
            let Request::Tiles { texture, .. } = request else {
                return Err(invalid_parameter(
                    "request",
                    &mode,
                    &"input buffer without a texture",
                ));
            };
            inputs.push(staging.stage(kind, &encode(*texture))?);
        }
        let outputs: Vec<PathBuf> = manifest
            .outputs
            .iter()
            .map(|&kind| staging.buffer_path(kind))
            .collect();

        let invocation = Invocation::new(
            mode,
            resolution,
            inputs,
            outputs.clone(),
            request.debug_tile(),
        )?;
        info!("running engine in mode {mode} at resolution {resolution}");
        self.engine.run(&invocation)?;

        let mut buffers = Vec::with_capacity(outputs.len());
        for (&kind, path) in manifest.outputs.iter().zip(&outputs) {
            let buffer = RawBuffer::read(path)?;
            if kind.has_resolution_side() {
                let expected = kind.layout().buffer_len(resolution);
                if buffer.len() != expected {
                    return Err(WangError::SizeMismatch {
                        expected,
                        actual: buffer.len(),
                    });
                }
            }
            debug!("read {} bytes of {}", buffer.len(), kind.file_stem());
            buffers.push((kind, buffer));
        }
        staging.close();

        Ok(EngineOutputs {
            mode,
            resolution,
            buffers,
        })
    }

    /// Run a tile request and post-process its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A composite is requested from a mode that cannot provide one
    ///   (checked before the engine runs)
    /// - The run or decoding fails
    pub fn generate_tiles(
        &self,
        texture: &RgbImage,
        mode: Mode,
        debug_tile: Option<usize>,
        composite: bool,
    ) -> Result<TileArtifacts> {
        if composite {
            ensure_composite(mode)?;
        }
        let outputs = self.invoke(&Request::Tiles {
            texture,
            mode,
            debug_tile,
        })?;
        PostProcessor::new(outputs).tiles(composite.then_some(texture))
    }

    /// Generate the index map
    ///
    /// # Errors
    ///
    /// Returns an error if the run or decoding fails
    pub fn generate_index(&self, resolution: u32) -> Result<RgbImage> {
        PostProcessor::new(self.invoke(&Request::Index { resolution })?).map()
    }

    /// Generate the palette map
    ///
    /// # Errors
    ///
    /// Returns an error if the run or decoding fails
    pub fn generate_palette(&self, resolution: u32) -> Result<RgbImage> {
        PostProcessor::new(self.invoke(&Request::Palette { resolution })?).map()
    }
}
