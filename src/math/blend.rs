//! Linear alpha blending shared by the engine and the post-processor
//!
//! The mask acts as coverage of the overlay: 0 keeps the underlying pixel,
//! 255 keeps the overlay, values in between mix proportionally.

/// Blend one channel of `over` onto `under` with coverage `mask`
///
/// Integer arithmetic keeps both end points exact.
pub const fn blend_channel(under: u8, over: u8, mask: u8) -> u8 {
    let m = mask as u32;
    let mixed = (under as u32 * (255 - m) + over as u32 * m + 127) / 255;
    mixed as u8
}

/// Blend an RGB triple channel by channel
pub const fn blend_rgb(under: [u8; 3], over: [u8; 3], mask: u8) -> [u8; 3] {
    [
        blend_channel(under[0], over[0], mask),
        blend_channel(under[1], over[1], mask),
        blend_channel(under[2], over[2], mask),
    ]
}
