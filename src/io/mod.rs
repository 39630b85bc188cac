//! Input/output: raw buffers, image files, command line and shared errors

/// Raw pixel buffer codec
pub mod buffer;
/// Front end command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Texture loading and artifact export
pub mod image;
/// Progress display for long-running graph cuts
pub mod progress;
