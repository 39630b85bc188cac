//! Turns decoded engine buffers into the rasters written to disk

use crate::engine::mode::{BufferKind, Mode};
use crate::io::buffer::{RawBuffer, decode, decode_inferred_rgb};
use crate::io::error::{Result, WangError, invalid_parameter};
use crate::math::blend::blend_rgb;
use crate::pipeline::mask::{CornerPack, MaskSource};
use crate::pipeline::orchestrator::EngineOutputs;
use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};
use log::debug;

/// Rasters produced by a tile request
#[derive(Debug, Clone)]
pub struct TileArtifacts {
    /// Final Wang tile atlas
    pub tiles: RgbImage,
    /// Packed corners with the mask as alpha, when the mode emits them
    pub corners: Option<RgbaImage>,
    /// Corner overlay composited onto the source texture, when requested
    pub composite: Option<RgbImage>,
    /// Graph cut constraint visualisation, when the mode emits it
    pub constraints: Option<RgbImage>,
}

/// Blend `overlay` onto `source` through `mask`
///
/// # Errors
///
/// Returns [`WangError::DimensionMismatch`] unless all three rasters share
/// the source dimensions
pub fn composite(overlay: &RgbImage, source: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    let expected = source.dimensions();
    for actual in [overlay.dimensions(), mask.dimensions()] {
        if actual != expected {
            return Err(WangError::DimensionMismatch { expected, actual });
        }
    }

    Ok(RgbImage::from_fn(expected.0, expected.1, |x, y| {
        let under = source.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
        let over = overlay.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
        let coverage = mask.get_pixel_checked(x, y).map_or(0, |p| p.0[0]);
        Rgb(blend_rgb(under, over, coverage))
    }))
}

/// Re-export an index map with its red channel as opacity
pub fn index_with_alpha(index: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(index.width(), index.height(), |x, y| {
        let [r, g, b] = index.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
        Rgba([r, g, b, r])
    })
}

/// Decode a constraint map whose side is inferred from its length
///
/// # Errors
///
/// Returns [`WangError::SizeMismatch`] if the length is not a square pixel
/// count times three
pub fn decode_constraint_map(buffer: RawBuffer) -> Result<RgbImage> {
    let image = decode_inferred_rgb(buffer)?;
    debug!("constraint map side {}", image.width());
    Ok(image)
}

/// Decodes the outputs of one engine run
#[derive(Debug)]
pub struct PostProcessor {
    outputs: EngineOutputs,
}

impl PostProcessor {
    /// Wrap the outputs of a successful run
    pub const fn new(outputs: EngineOutputs) -> Self {
        Self { outputs }
    }

    /// Mode that produced the outputs
    pub const fn mode(&self) -> Mode {
        self.outputs.mode()
    }

    /// Decode the tile outputs, compositing onto `source` when given
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The outputs do not come from a tile mode
    /// - A buffer fails to decode
    /// - A composite is requested from a mode without a full-colour corner
    ///   pack
    pub fn tiles(mut self, source: Option<&RgbImage>) -> Result<TileArtifacts> {
        let mode = self.outputs.mode();
        let side = self.outputs.resolution();
        if !mode.requires_texture() {
            return Err(invalid_parameter(
                "mode",
                &mode,
                &"outputs carry no tile set",
            ));
        }
        if source.is_some() {
            ensure_composite(mode)?;
        }

        let tiles = decode::<Rgb<u8>>(self.outputs.take(BufferKind::TileSet)?, side)?;

        let corners = match MaskSource::for_mode(mode) {
            Some(mask_source) => {
                let kind = match mask_source {
                    MaskSource::AlphaChannel => BufferKind::CornerPackRgba,
                    MaskSource::DuplicatedChannel { .. } => BufferKind::CornerPackRgb,
                };
                Some(mask_source.decode(self.outputs.take(kind)?, side)?)
            }
            None => None,
        };

        let composite = match (source, corners.as_ref()) {
            (Some(source), Some(pack)) => Some(composite_pack(pack, source)?),
            _ => None,
        };

        let constraints = if mode.manifest().outputs.contains(&BufferKind::ConstraintMap) {
            Some(decode_constraint_map(
                self.outputs.take(BufferKind::ConstraintMap)?,
            )?)
        } else {
            None
        };

        Ok(TileArtifacts {
            tiles,
            corners: corners.map(CornerPack::into_image),
            composite,
            constraints,
        })
    }

    /// Decode the single map written by index or palette mode
    ///
    /// # Errors
    ///
    /// Returns an error if the outputs come from a tile mode or the buffer
    /// fails to decode
    pub fn map(mut self) -> Result<RgbImage> {
        let kind = match self.outputs.mode() {
            Mode::Index => BufferKind::IndexMap,
            Mode::Palette => BufferKind::PaletteMap,
            mode => {
                return Err(invalid_parameter(
                    "mode",
                    &mode,
                    &"outputs carry no index or palette map",
                ));
            }
        };
        let side = self.outputs.resolution();
        decode::<Rgb<u8>>(self.outputs.take(kind)?, side)
    }
}

fn composite_pack(pack: &CornerPack, source: &RgbImage) -> Result<RgbImage> {
    composite(&pack.overlay(), source, &pack.mask())
}

/// Check that `mode` emits a corner pack that can be composited
///
/// # Errors
///
/// Returns an error if the mode emits no corner pack, or one whose mask
/// overwrites a colour channel
pub fn ensure_composite(mode: Mode) -> Result<()> {
    if MaskSource::supports_composite(mode) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "composite",
            &mode,
            &"mode emits no full-colour corner pack",
        ))
    }
}
