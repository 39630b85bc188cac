//! Synthesis constants, wire conventions and runtime configuration defaults

// Corner colour scheme
/// Number of corner colours in the generated tile set
pub const NUM_COLORS: usize = 2;
/// Tiles along each side of the packed atlas (one tile per corner combination)
pub const TILES_PER_SIDE: usize = NUM_COLORS * NUM_COLORS;
/// Total number of tiles in the packed atlas
pub const TILE_COUNT: usize = TILES_PER_SIDE * TILES_PER_SIDE;

// Graph cuts are run at this per-tile size at most; larger tiles are downsampled first
/// Maximum per-tile working resolution for graph cuts
pub const VISUAL_SCALE: usize = 128;

// The inner sink square is inset by tile_size / CONSTRAINT_PADDING_DIVISOR
/// Divisor controlling the inset of the sink square in the constraint map
pub const CONSTRAINT_PADDING_DIVISOR: usize = 7;

/// Constraint map colour of pixels bound to the packed corners layer
pub const CONSTRAINT_COLOR_SOURCE: [u8; 3] = [255, 0, 0];
/// Constraint map colour of pixels bound to the source texture layer
pub const CONSTRAINT_COLOR_SINK: [u8; 3] = [0, 255, 0];
/// Constraint map colour of pixels left to the graph cut
pub const CONSTRAINT_COLOR_FREE: [u8; 3] = [100, 100, 100];

/// Palette colour for each corner colour class
pub const CORNER_PALETTE: [[u8; 3]; 4] = [
    [230, 57, 70],
    [29, 111, 214],
    [244, 196, 48],
    [46, 160, 67],
];

/// Fixed seed for the corner lattice of the index map
pub const INDEX_MAP_SEED: u64 = 1;

// Raw buffer channel counts
/// Colour channel of an RGB corner pack overwritten with the mask
pub const DUPLICATED_MASK_CHANNEL: usize = 0;
/// Bytes per pixel of an RGB buffer
pub const RGB_CHANNELS: usize = 3;
/// Bytes per pixel of an RGBA buffer
pub const RGBA_CHANNELS: usize = 4;

// Engine process settings
/// File name of the synthesis engine executable (without platform suffix)
pub const ENGINE_EXECUTABLE_NAME: &str = "wtgcore";
/// Default time an engine process may run before it is killed
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 300;
/// Interval between engine exit status polls
pub const ENGINE_POLL_INTERVAL_MS: u64 = 50;
/// Exit code returned by the engine on any failure
pub const ENGINE_FAILURE_EXIT_CODE: u8 = 1;

/// Prefix of per-run staging directories
pub const STAGING_PREFIX: &str = "wangtiles-";

// Output settings
/// Suffix added to the tile set artifact
pub const TILES_SUFFIX: &str = "_wangtiles";
/// Suffix added to the corner pack artifact
pub const CORNERS_SUFFIX: &str = "_wangtiles_corners";
/// Suffix added to the graph cut constraint artifact
pub const CONSTRAINTS_SUFFIX: &str = "_wangtiles_graphcut_constraints";
/// Suffix added to the composite artifact
pub const COMPOSITE_SUFFIX: &str = "_wangtiles_composite";
/// Extension of every written artifact
pub const ARTIFACT_EXTENSION: &str = "png";

/// Width of the per-tile progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
