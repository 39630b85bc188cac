//! Wang tile generation from a single square texture
//!
//! A front end stages raw pixel buffers, drives a synthesis engine through a
//! small command-line protocol and turns the engine's buffers into images.
//! The engine stitches packed corner patches into the source with per-tile
//! graph cuts so every tile matches its neighbours along shared corners.

#![forbid(unsafe_code)]

/// Engine contract, invocation modes and engine implementations
pub mod engine;
/// Input/output operations and error handling
pub mod io;
/// Pixel blending and resampling
pub mod math;
/// Staging, orchestration and post-processing of engine runs
pub mod pipeline;
/// Tile set, index map and palette map synthesis
pub mod synthesis;

pub use io::error::{Result, WangError};
