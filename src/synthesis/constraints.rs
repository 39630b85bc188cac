//! Per-tile constraint map fixing which pixels the graph cut may move
//!
//! The tile border is bound to the packed corners so tiles stay seamless,
//! while the centre cross and an inner square are bound to the source
//! texture so each tile keeps some of its own content. The cut is free to
//! run anywhere in between.

use crate::io::configuration::{
    CONSTRAINT_COLOR_FREE, CONSTRAINT_COLOR_SINK, CONSTRAINT_COLOR_SOURCE,
    CONSTRAINT_PADDING_DIVISOR,
};
use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Binding of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Left to the graph cut
    Free,
    /// Always taken from the packed corners
    Source,
    /// Always taken from the source texture
    Sink,
}

impl Constraint {
    /// Diagnostic colour used in the constraint buffer
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::Free => CONSTRAINT_COLOR_FREE,
            Self::Source => CONSTRAINT_COLOR_SOURCE,
            Self::Sink => CONSTRAINT_COLOR_SINK,
        }
    }
}

/// Square grid of constraints for one tile at graph cut scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMap {
    cells: Array2<Constraint>,
}

impl ConstraintMap {
    /// Build the standard constraint layout for a tile of `size` pixels
    pub fn new(size: usize) -> Self {
        let mut map = Self {
            cells: Array2::from_elem((size, size), Constraint::Free),
        };
        if size == 0 {
            return map;
        }

        let half = size / 2;
        let last = size - 1;
        for p in 0..size {
            map.set(p, 0, Constraint::Source);
            map.set(p, last, Constraint::Source);
            if p == 0 || p == last {
                continue;
            }
            map.set(0, p, Constraint::Source);
            map.set(last, p, Constraint::Source);

            map.set(p, half.saturating_sub(1), Constraint::Sink);
            map.set(p, half, Constraint::Sink);
            if p + 1 == half || p == half {
                continue;
            }
            map.set(half.saturating_sub(1), p, Constraint::Sink);
            map.set(half, p, Constraint::Sink);
        }

        let padding = size / CONSTRAINT_PADDING_DIVISOR;
        for y in padding..size - padding {
            for x in padding..size - padding {
                map.set(x, y, Constraint::Sink);
            }
        }
        map
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Constraint at column `x`, row `y`; outside the map counts as free
    pub fn get(&self, x: usize, y: usize) -> Constraint {
        self.cells.get((y, x)).copied().unwrap_or(Constraint::Free)
    }

    /// Number of pixels with the given binding
    pub fn count(&self, constraint: Constraint) -> usize {
        self.cells.iter().filter(|&&c| c == constraint).count()
    }

    /// Render as the diagnostic RGB raster emitted by the engine
    pub fn to_image(&self) -> RgbImage {
        let side = self.size() as u32;
        RgbImage::from_fn(side, side, |x, y| {
            Rgb(self.get(x as usize, y as usize).color())
        })
    }

    fn set(&mut self, x: usize, y: usize, constraint: Constraint) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = constraint;
        }
    }
}
