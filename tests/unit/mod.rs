//! Unit test modules, one per source file

mod bin;
mod engine;
mod io;
mod math;
mod pipeline;
mod synthesis;
