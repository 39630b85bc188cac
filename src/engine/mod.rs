//! Synthesis engine boundary
//!
//! The pipeline only sees the [`SynthesisEngine`] trait: an invocation names
//! a mode, a resolution and buffer file paths, and the engine either writes
//! every declared output or fails. The executable and the in-process engine
//! are interchangeable behind it.

/// Wire form of an invocation
pub mod invocation;
/// Modes and their buffer manifests
pub mod mode;
/// In-process engine
pub mod native;
/// Child process engine with timeout
pub mod process;

use crate::io::error::Result;
use invocation::Invocation;

/// Anything that can carry out an engine invocation
pub trait SynthesisEngine {
    /// Run one invocation to completion
    ///
    /// On success every output path of the invocation holds a buffer. On
    /// failure the outputs are undefined and must not be read.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine could not run or reported failure
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

impl<E: SynthesisEngine + ?Sized> SynthesisEngine for Box<E> {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }
}

impl<E: SynthesisEngine + ?Sized> SynthesisEngine for &E {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }
}
