//! Error types shared by the codec, the engine and the pipeline

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tile generation operations
#[derive(Debug)]
pub enum WangError {
    /// Failed to load a source texture from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an artifact to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Source texture is not square
    Shape {
        /// Texture width in pixels
        width: u32,
        /// Texture height in pixels
        height: u32,
    },

    /// Raw buffer length disagrees with the side and channel count it should carry
    SizeMismatch {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Two rasters that must line up pixel for pixel have different dimensions
    DimensionMismatch {
        /// Dimensions required (width, height)
        expected: (u32, u32),
        /// Dimensions supplied (width, height)
        actual: (u32, u32),
    },

    /// The engine executable could not be started
    EngineSpawn {
        /// Executable that failed to start
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status
    ///
    /// Output buffers written by a failed engine are never read.
    EngineFailure {
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// The engine did not finish in time and was killed
    EngineTimeout {
        /// Configured timeout in milliseconds
        timeout_ms: u128,
    },

    /// A debug tile index was given for a mode without per-tile diagnostics
    DebugTileUnsupported {
        /// Name of the requested mode
        mode: &'static str,
    },

    /// Tile index exceeds the packed atlas
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the atlas
        max_tiles: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for WangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Shape { width, height } => {
                write!(f, "Input image must be square sized, got {width}x{height}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Buffer size mismatch: expected {expected} bytes, found {actual}"
                )
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Dimension mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::EngineSpawn { path, source } => {
                write!(
                    f,
                    "Failed to start engine '{}': {source}",
                    path.display()
                )
            }
            Self::EngineFailure { code: Some(code) } => {
                write!(f, "Engine failed with exit code {code}")
            }
            Self::EngineFailure { code: None } => {
                write!(f, "Engine was terminated by a signal")
            }
            Self::EngineTimeout { timeout_ms } => {
                write!(f, "Engine timed out after {timeout_ms} ms and was killed")
            }
            Self::DebugTileUnsupported { mode } => {
                write!(
                    f,
                    "Mode '{mode}' has no per-tile diagnostics, a debug tile index cannot be used"
                )
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for WangError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::EngineSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tile generation results
pub type Result<T> = std::result::Result<T, WangError>;

/// Attaches a path and operation to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`WangError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation attached
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| WangError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for WangError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WangError {
    WangError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> WangError {
    WangError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

