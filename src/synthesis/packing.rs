//! Corner colour packing of the tile atlas
//!
//! Every tile is identified by the colours of its four corners. With two
//! colours there are sixteen tiles, laid out in a 4x4 atlas so that
//! neighbouring atlas cells already share corner colours.
//!
//! Atlas rows grow northwards: the tile in the next row is the northern
//! neighbour, and the atlas wraps in both directions.

use crate::io::configuration::TILE_COUNT;

/// Reference atlas layout for two corner colours
///
/// Taken from figure 9 of "An Alternative for Wang Tiles: Colored Edges
/// versus Colored Corners". Each entry is a tile code with two bits per
/// corner: `(ne << 6) | (se << 4) | (sw << 2) | nw`.
pub const REFERENCE_PACKING: [u8; TILE_COUNT] =
    [0, 16, 68, 1, 64, 65, 81, 5, 17, 84, 85, 69, 4, 80, 21, 20];

/// Colour index at each corner of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Corners {
    /// North-east corner
    pub ne: u8,
    /// South-east corner
    pub se: u8,
    /// South-west corner
    pub sw: u8,
    /// North-west corner
    pub nw: u8,
}

impl Corners {
    /// Create from the four corner colours
    pub const fn new(ne: u8, se: u8, sw: u8, nw: u8) -> Self {
        Self { ne, se, sw, nw }
    }

    /// Packed tile code
    pub const fn code(self) -> u8 {
        ((self.ne & 3) << 6) | ((self.se & 3) << 4) | ((self.sw & 3) << 2) | (self.nw & 3)
    }

    /// Unpack a tile code
    pub const fn from_code(code: u8) -> Self {
        Self {
            ne: (code >> 6) & 3,
            se: (code >> 4) & 3,
            sw: (code >> 2) & 3,
            nw: code & 3,
        }
    }

    /// Colour of the tile quadrant touching the given corner
    pub const fn quadrant(self, north: bool, east: bool) -> u8 {
        match (north, east) {
            (true, true) => self.ne,
            (true, false) => self.nw,
            (false, true) => self.se,
            (false, false) => self.sw,
        }
    }
}

/// Bidirectional lookup between tile codes and atlas positions
#[derive(Debug, Clone)]
pub struct PackingTable {
    inverse: [Option<u8>; 256],
}

impl Default for PackingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PackingTable {
    /// Build the inverse of [`REFERENCE_PACKING`]
    pub fn new() -> Self {
        let mut inverse = [None; 256];
        for (index, &code) in REFERENCE_PACKING.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(usize::from(code)) {
                *slot = Some(index as u8);
            }
        }
        Self { inverse }
    }

    /// Atlas index of the tile with the given corners
    pub fn tile_index(&self, corners: Corners) -> Option<usize> {
        self.inverse
            .get(usize::from(corners.code()))
            .copied()
            .flatten()
            .map(usize::from)
    }

    /// Corners of the tile at an atlas index
    pub fn corners(&self, tile_index: usize) -> Option<Corners> {
        REFERENCE_PACKING
            .get(tile_index)
            .copied()
            .map(Corners::from_code)
    }
}
