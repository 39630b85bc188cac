//! Pixel arithmetic shared by the engine and the post-processor

/// Mask-weighted blending of colour channels
pub mod blend;
/// Box-filter downsampling and nearest-neighbour mask upsampling
pub mod mip;
