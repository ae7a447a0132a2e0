//! Collapse grid and per-cell state
//!
//! Each cell carries its domain as a bitset over catalog slots, its assignment
//! and an entropy value used for scheduling. Cells are addressed either by
//! (row, col) or by a stable integer handle `row * cols + col`, which is what
//! the frontier stores.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::{COLLAPSED_ENTROPY, UNTOUCHED_ENTROPY};
use crate::spatial::tiles::TileId;

/// Stable integer handle of a grid cell
pub type CellHandle = usize;

/// Lifecycle of a cell
///
/// Transitions only move forward: `Unconstrained` to `Constrained` to
/// `Collapsed`. `Contradicted` marks a touched cell whose domain ran empty
/// without an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Never touched by propagation; empty domain, absent from the frontier
    Unconstrained,
    /// Domain populated with finite entropy
    Constrained,
    /// Assigned a tile
    Collapsed,
    /// Touched or frozen with nothing left in the domain
    Contradicted,
}

/// A single output position
#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    domain: TileBitset,
    assignment: Option<TileId>,
    entropy: f64,
    touched: bool,
    frozen: bool,
}

impl Cell {
    /// Create an unconstrained cell sized for a catalog of `tile_count` tiles
    pub fn new(row: usize, col: usize, tile_count: usize) -> Self {
        Self {
            row,
            col,
            domain: TileBitset::new(tile_count),
            assignment: None,
            entropy: UNTOUCHED_ENTROPY,
            touched: false,
            frozen: false,
        }
    }

    /// Row of this cell
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Column of this cell
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Catalog slots still possible for this cell
    pub const fn domain(&self) -> &TileBitset {
        &self.domain
    }

    /// Number of tiles still possible
    pub fn domain_size(&self) -> usize {
        self.domain.count()
    }

    /// Assigned tile, once collapsed
    pub const fn assignment(&self) -> Option<TileId> {
        self.assignment
    }

    /// Current entropy, or the terminal value once collapsed
    pub const fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Whether propagation has ever narrowed this cell
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether the cell was dequeued for resolution (or collapsed)
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether a tile has been assigned
    pub const fn is_collapsed(&self) -> bool {
        self.assignment.is_some()
    }

    /// Current lifecycle state
    pub fn state(&self) -> CellState {
        if self.assignment.is_some() {
            CellState::Collapsed
        } else if !self.domain.is_empty() {
            CellState::Constrained
        } else if self.touched || self.frozen {
            CellState::Contradicted
        } else {
            CellState::Unconstrained
        }
    }

    /// Narrow the domain with a set of allowed slots
    ///
    /// The first narrowing initialises the domain, later ones intersect. Frozen
    /// and collapsed cells ignore narrowing. Returns whether the domain was
    /// touched.
    pub fn narrow(&mut self, allowed: &TileBitset) -> bool {
        if self.frozen || self.assignment.is_some() {
            return false;
        }
        if self.touched {
            self.domain.intersect_with(allowed);
        } else {
            self.domain.clone_from(allowed);
            self.touched = true;
        }
        true
    }

    /// Store a freshly computed entropy
    pub const fn set_entropy(&mut self, entropy: f64) {
        self.entropy = entropy;
    }

    /// Mark the cell as dequeued for resolution; one-way
    pub const fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Assign a tile, clearing the domain
    pub fn assign(&mut self, tile: TileId) {
        self.assignment = Some(tile);
        self.domain.clear();
        self.entropy = COLLAPSED_ENTROPY;
        self.frozen = true;
        self.touched = true;
    }
}

/// Fixed R x C array of cells created once per run
#[derive(Debug, Clone)]
pub struct CollapseGrid {
    cells: Array2<Cell>,
    dimensions: (usize, usize),
}

impl CollapseGrid {
    /// Create a grid of unconstrained cells
    pub fn new(rows: usize, cols: usize, tile_count: usize) -> Self {
        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| Cell::new(row, col, tile_count));

        Self {
            cells,
            dimensions: (rows, cols),
        }
    }

    /// Get the number of rows in the grid
    pub const fn rows(&self) -> usize {
        self.dimensions.0
    }

    /// Get the number of columns in the grid
    pub const fn cols(&self) -> usize {
        self.dimensions.1
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.dimensions.0 * self.dimensions.1
    }

    /// Whether the grid has no cells
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle of the cell at (row, col)
    pub const fn handle(&self, row: usize, col: usize) -> CellHandle {
        row * self.dimensions.1 + col
    }

    /// Position of a handle
    pub const fn position(&self, handle: CellHandle) -> (usize, usize) {
        if self.dimensions.1 == 0 {
            return (0, 0);
        }
        (handle / self.dimensions.1, handle % self.dimensions.1)
    }

    /// Whether (row, col) lies inside the grid
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.dimensions.0 && col < self.dimensions.1
    }

    /// Cell at (row, col)
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get((row, col))
    }

    /// Mutable cell at (row, col)
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut((row, col))
    }

    /// Iterate cells in raster order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Assigned tile ids in raster order, `None` for unresolved cells
    pub fn assignments(&self) -> Array2<Option<TileId>> {
        self.cells.map(Cell::assignment)
    }
}
