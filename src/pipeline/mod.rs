//! Front end side of the engine protocol: staging, invocation and decoding

/// Engine run orchestration
pub mod orchestrator;

/// Corner pack mask encodings
pub mod mask;

/// Decoding and compositing of engine outputs
pub mod postprocess;

/// Scoped scratch directories for buffer files
pub mod staging;

pub use orchestrator::{EngineOutputs, Pipeline, PipelineConfig, Request};
