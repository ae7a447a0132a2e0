//! Algorithm constants and runtime configuration defaults

/// Edge length in pixels of one unit tile
pub const DEFAULT_UNIT_SIZE: usize = 16;

// A 320px canvas of 16px tiles
/// Default number of output rows
pub const DEFAULT_OUTPUT_ROWS: usize = 20;
/// Default number of output columns
pub const DEFAULT_OUTPUT_COLS: usize = 20;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Entropy reported by cells that were never constrained
pub const UNTOUCHED_ENTROPY: f64 = f64::INFINITY;

/// Terminal entropy of a collapsed cell
pub const COLLAPSED_ENTROPY: f64 = -1.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix of the collapse-order animation
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Suffix of the catalog adjacency sheet
pub const CATALOG_SHEET_SUFFIX: &str = "_catalog";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Pixels between tiles on the catalog sheet
pub const CATALOG_SHEET_GAP: usize = 4;

// Result image shading of cells left unresolved
/// Fill of cells whose domain emptied without a tile being placed
pub const CONTRADICTION_COLOR: [u8; 4] = [255, 0, 255, 255];
/// Opacity of the grey shade over constrained cells
pub const UNRESOLVED_ALPHA: u8 = 160;
