//! Per-run scratch directory holding the buffers of one engine invocation
//!
//! The directory has a unique name and is removed when the staging area is
//! dropped, so every exit path of a run cleans up after itself.

use crate::engine::mode::BufferKind;
use crate::io::buffer::RawBuffer;
use crate::io::configuration::STAGING_PREFIX;
use crate::io::error::{Result, WithPath};
use log::warn;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Uniquely named temporary directory for buffer files
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a staging directory under `root`, or the system temp directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn new(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root).with_path(root, "create staging directory"),
            None => builder
                .tempdir()
                .with_path(std::env::temp_dir(), "create staging directory"),
        }?;
        Ok(Self { dir })
    }

    /// Directory holding the buffers
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path reserved for a buffer of the given kind
    pub fn buffer_path(&self, kind: BufferKind) -> PathBuf {
        self.dir.path().join(format!("{}.img", kind.file_stem()))
    }

    /// Write a buffer to its reserved path
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be written
    pub fn stage(&self, kind: BufferKind, buffer: &RawBuffer) -> Result<PathBuf> {
        let path = self.buffer_path(kind);
        buffer.write(&path)?;
        Ok(path)
    }

    /// Remove the directory now, logging instead of failing on errors
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("failed to remove staging directory '{}': {e}", path.display());
        }
    }
}
