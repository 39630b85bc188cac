//! Headerless raw pixel buffers exchanged with the synthesis engine
//!
//! A buffer carries row-major, channel-interleaved bytes of a square raster.
//! Side length and channel count are agreed out of band per mode; only the
//! constraint map has its side inferred from the byte count.

use crate::io::configuration::{RGB_CHANNELS, RGBA_CHANNELS};
use crate::io::error::{Result, WangError, WithPath};
use image::{ImageBuffer, Pixel, Rgb, RgbImage};
use std::path::Path;

/// Channel layout of a raw buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Three bytes per pixel
    Rgb,
    /// Four bytes per pixel
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => RGB_CHANNELS,
            Self::Rgba => RGBA_CHANNELS,
        }
    }

    /// Byte length of a square buffer with the given side
    pub const fn buffer_len(self, side: u32) -> usize {
        side as usize * side as usize * self.channels()
    }
}

/// Untyped pixel bytes without header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBuffer {
    bytes: Vec<u8>,
}

impl RawBuffer {
    /// Wrap bytes produced elsewhere
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Borrow the raw bytes
    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Take ownership of the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Byte length
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read a buffer file in full
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read
    pub fn read(path: &Path) -> Result<Self> {
        std::fs::read(path)
            .map(Self::from_bytes)
            .with_path(path, "read buffer")
    }

    /// Write the buffer to a file, replacing any previous content
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes).with_path(path, "write buffer")
    }
}

/// Pack an image into a raw buffer of its own channel layout
///
/// The image must already be square and converted to the target layout;
/// no colour conversion happens here.
pub fn encode<P>(image: &ImageBuffer<P, Vec<u8>>) -> RawBuffer
where
    P: Pixel<Subpixel = u8>,
{
    RawBuffer::from_bytes(image.as_raw().clone())
}

/// Unpack a square raster of the given side
///
/// # Errors
///
/// Returns [`WangError::SizeMismatch`] if the buffer length is not
/// `side * side * channels`
pub fn decode<P>(buffer: RawBuffer, side: u32) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    let expected = side as usize * side as usize * usize::from(P::CHANNEL_COUNT);
    let actual = buffer.len();
    if actual != expected {
        return Err(WangError::SizeMismatch { expected, actual });
    }
    ImageBuffer::from_raw(side, side, buffer.into_bytes())
        .ok_or(WangError::SizeMismatch { expected, actual })
}

/// Side length of a square buffer inferred from its byte count
///
/// Computes `floor(sqrt(len / channels))` exactly in integer arithmetic.
pub fn infer_side(len: usize, channels: usize) -> u32 {
    if channels == 0 {
        return 0;
    }
    let pixels = (len / channels) as u64;
    u32::try_from(pixels.isqrt()).unwrap_or(u32::MAX)
}

/// Decode an RGB buffer whose side is not known in advance
///
/// # Errors
///
/// Returns [`WangError::SizeMismatch`] if the length is not a square pixel
/// count times three
pub fn decode_inferred_rgb(buffer: RawBuffer) -> Result<RgbImage> {
    let side = infer_side(buffer.len(), RGB_CHANNELS);
    decode::<Rgb<u8>>(buffer, side)
}
