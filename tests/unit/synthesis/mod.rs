//! Synthesis engine internals tests

mod constraints;
mod indexmap;
