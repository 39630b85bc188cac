//! Where a corner pack keeps its validity mask
//!
//! One engine revision writes the mask into a true alpha channel, another
//! repeats it through the colour channels. The encoding is chosen by the
//! mode that produced the buffer, never by looking at pixel values.

use crate::engine::mode::Mode;
use crate::io::buffer::{ChannelLayout, RawBuffer, decode};
use crate::io::configuration::DUPLICATED_MASK_CHANNEL;
use crate::io::error::{Result, invalid_parameter};
use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Encoding of the corner pack mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSource {
    /// RGBA buffer, mask in the alpha channel
    AlphaChannel,
    /// RGB buffer, mask repeated into colour channels; `channel` is read
    DuplicatedChannel {
        /// Colour channel used as the mask
        channel: usize,
    },
}

impl MaskSource {
    /// Mask encoding of the corner pack emitted by `mode`, if it emits one
    pub const fn for_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::TilesCorners => Some(Self::DuplicatedChannel {
                channel: DUPLICATED_MASK_CHANNEL,
            }),
            Mode::TilesCornersConstraints => Some(Self::AlphaChannel),
            Mode::LegacyTiles | Mode::Tiles | Mode::Index | Mode::Palette => None,
        }
    }

    /// Whether all three colour channels survive next to the mask
    pub const fn keeps_colour(self) -> bool {
        matches!(self, Self::AlphaChannel)
    }

    /// Whether corner packs emitted by `mode` can be composited onto the source
    pub const fn supports_composite(mode: Mode) -> bool {
        match Self::for_mode(mode) {
            Some(source) => source.keeps_colour(),
            None => false,
        }
    }

    /// Channel layout of the buffer carrying this encoding
    pub const fn layout(self) -> ChannelLayout {
        match self {
            Self::AlphaChannel => ChannelLayout::Rgba,
            Self::DuplicatedChannel { .. } => ChannelLayout::Rgb,
        }
    }

    /// Decode a corner pack buffer of the given side
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer length does not match the side and layout
    /// - The duplicated channel index is not an RGB channel
    pub fn decode(self, buffer: RawBuffer, side: u32) -> Result<CornerPack> {
        match self {
            Self::AlphaChannel => {
                let image = decode::<Rgba<u8>>(buffer, side)?;
                Ok(CornerPack::from_fn(side, |x, y| {
                    let [r, g, b, a] = image.get_pixel_checked(x, y).map_or([0; 4], |p| p.0);
                    ([r, g, b], a)
                }))
            }
            Self::DuplicatedChannel { channel } => {
                if channel >= 3 {
                    return Err(invalid_parameter(
                        "channel",
                        &channel,
                        &"must be 0, 1 or 2",
                    ));
                }
                let image = decode::<Rgb<u8>>(buffer, side)?;
                Ok(CornerPack::from_fn(side, |x, y| {
                    let rgb = image.get_pixel_checked(x, y).map_or([0; 3], |p| p.0);
                    (rgb, rgb.get(channel).copied().unwrap_or(0))
                }))
            }
        }
    }
}

/// Corner colours with their mask asserted as alpha
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerPack {
    image: RgbaImage,
}

impl CornerPack {
    fn from_fn(side: u32, mut pixel: impl FnMut(u32, u32) -> ([u8; 3], u8)) -> Self {
        Self {
            image: RgbaImage::from_fn(side, side, |x, y| {
                let ([r, g, b], mask) = pixel(x, y);
                Rgba([r, g, b, mask])
            }),
        }
    }

    /// RGBA image: corner colours with the mask as alpha
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the RGBA image
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Corner colours without the mask
    pub fn overlay(&self) -> RgbImage {
        RgbImage::from_fn(self.image.width(), self.image.height(), |x, y| {
            let [r, g, b, _] = self.image.get_pixel_checked(x, y).map_or([0; 4], |p| p.0);
            Rgb([r, g, b])
        })
    }

    /// Mask as a grey image
    pub fn mask(&self) -> GrayImage {
        GrayImage::from_fn(self.image.width(), self.image.height(), |x, y| {
            Luma([self.image.get_pixel_checked(x, y).map_or(0, |p| p.0[3])])
        })
    }
}
