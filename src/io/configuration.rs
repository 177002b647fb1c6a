//! Generation constants and runtime configuration defaults

// Expansion factors between the graph and the two tile grids
/// Coarse tiles per graph cell along each axis (plus one border tile)
pub const COARSE_SCALE: usize = 2;
/// Fine tiles per coarse tile along each axis (odd, so blocks have a center)
pub const FINE_SCALE: usize = 7;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed graph dimension
pub const MAX_GRID_DIMENSION: usize = 512;

/// Shortest walk that can still close into a loop
pub const MIN_CYCLE_STEPS: usize = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default graph width in cells
pub const DEFAULT_WIDTH: usize = 8;
/// Default graph height in cells
pub const DEFAULT_HEIGHT: usize = 8;
/// Default random walk length
pub const DEFAULT_CYCLE_STEPS: usize = 4;
/// Default number of seeds tried per dungeon before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;

// Output settings
/// Suffix of the rendered graph file
pub const GRAPH_SUFFIX: &str = "_graph.txt";
/// Suffix of the rendered coarse grid file
pub const COARSE_SUFFIX: &str = "_coarse.txt";
/// Suffix of the rendered fine grid file
pub const FINE_SUFFIX: &str = "_fine.txt";
/// Suffix of the labeled graph export
pub const JSON_SUFFIX: &str = "_graph.json";
/// Suffix of the fine grid image
pub const IMAGE_SUFFIX: &str = "_fine.png";

// PNG colours, RGBA
/// Colour of room tiles
pub const ROOM_COLOR: [u8; 4] = [205, 190, 160, 255];
/// Colour of door tiles
pub const DOOR_COLOR: [u8; 4] = [140, 70, 30, 255];
/// Colour of empty tiles
pub const EMPTY_COLOR: [u8; 4] = [0, 0, 0, 0];
