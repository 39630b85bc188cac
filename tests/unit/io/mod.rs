//! Input/output tests

mod buffer;
mod image;
mod progress;
