//! Engine invocation modes and the buffers each one exchanges
//!
//! Every mode carries a fixed manifest of input and output buffers. The
//! manifest is the single source of truth for what gets staged, what the
//! engine must write, and how each buffer is decoded afterwards.

use crate::io::buffer::ChannelLayout;
use std::fmt;

/// Kind of raw buffer exchanged with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Source texture
    Texture,
    /// Synthesised tile atlas
    TileSet,
    /// Corner pack whose mask is repeated into the colour channels
    CornerPackRgb,
    /// Corner pack with the mask in a true alpha channel
    CornerPackRgba,
    /// Graph cut constraint visualisation; side is inferred from its length
    ConstraintMap,
    /// Canonical tile index map
    IndexMap,
    /// Canonical corner colour palette
    PaletteMap,
}

impl BufferKind {
    /// Channel layout of the buffer
    pub const fn layout(self) -> ChannelLayout {
        match self {
            Self::CornerPackRgba => ChannelLayout::Rgba,
            Self::Texture
            | Self::TileSet
            | Self::CornerPackRgb
            | Self::ConstraintMap
            | Self::IndexMap
            | Self::PaletteMap => ChannelLayout::Rgb,
        }
    }

    /// Whether the side length equals the invocation resolution
    pub const fn has_resolution_side(self) -> bool {
        !matches!(self, Self::ConstraintMap)
    }

    /// File stem used when staging the buffer
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Texture => "input",
            Self::TileSet => "tiles",
            Self::CornerPackRgb | Self::CornerPackRgba => "corners",
            Self::ConstraintMap => "constraints",
            Self::IndexMap => "index",
            Self::PaletteMap => "palette",
        }
    }
}

/// Input and output buffers of a mode, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    /// Buffers the engine reads
    pub inputs: &'static [BufferKind],
    /// Buffers the engine writes
    pub outputs: &'static [BufferKind],
}

impl Manifest {
    /// Number of buffer paths on the command line
    pub const fn buffer_count(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }
}

/// Engine invocation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Flagless invocation producing only the tile set
    LegacyTiles,
    /// Tile set only
    Tiles,
    /// Tile set and a corner pack with the mask in its colour channels
    TilesCorners,
    /// Tile set, corner pack with alpha and the constraint map
    TilesCornersConstraints,
    /// Texture-independent index map
    Index,
    /// Texture-independent palette map
    Palette,
}

impl Mode {
    /// Every mode, oldest first
    pub const ALL: [Self; 6] = [
        Self::LegacyTiles,
        Self::Tiles,
        Self::TilesCorners,
        Self::TilesCornersConstraints,
        Self::Index,
        Self::Palette,
    ];

    /// Buffers exchanged in this mode
    pub const fn manifest(self) -> Manifest {
        use BufferKind::{
            ConstraintMap, CornerPackRgb, CornerPackRgba, IndexMap, PaletteMap, Texture, TileSet,
        };
        match self {
            Self::LegacyTiles | Self::Tiles => Manifest {
                inputs: &[Texture],
                outputs: &[TileSet],
            },
            Self::TilesCorners => Manifest {
                inputs: &[Texture],
                outputs: &[TileSet, CornerPackRgb],
            },
            Self::TilesCornersConstraints => Manifest {
                inputs: &[Texture],
                outputs: &[TileSet, CornerPackRgba, ConstraintMap],
            },
            Self::Index => Manifest {
                inputs: &[],
                outputs: &[IndexMap],
            },
            Self::Palette => Manifest {
                inputs: &[],
                outputs: &[PaletteMap],
            },
        }
    }

    /// Leading command-line flag, absent for the legacy mode
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::LegacyTiles => None,
            Self::Tiles | Self::TilesCorners | Self::TilesCornersConstraints => Some("--tiles"),
            Self::Index => Some("--index"),
            Self::Palette => Some("--palette"),
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::LegacyTiles => "legacy-tiles",
            Self::Tiles => "tiles",
            Self::TilesCorners => "tiles+corners",
            Self::TilesCornersConstraints => "tiles+corners+constraints",
            Self::Index => "index",
            Self::Palette => "palette",
        }
    }

    /// Whether a debug tile index may restrict this mode to one tile
    pub const fn supports_debug_tile(self) -> bool {
        matches!(self, Self::TilesCornersConstraints)
    }

    /// Whether the mode consumes a source texture
    pub const fn requires_texture(self) -> bool {
        !self.manifest().inputs.is_empty()
    }

    /// Find the mode with the given flag and number of buffer paths
    ///
    /// Modes sharing a flag are told apart by their manifest sizes.
    pub fn resolve(flag: Option<&str>, buffer_count: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.flag() == flag && mode.manifest().buffer_count() == buffer_count)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
