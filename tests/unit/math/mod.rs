//! Pixel arithmetic tests

mod blend;
