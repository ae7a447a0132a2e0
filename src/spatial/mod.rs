//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The collapse grid and its cells
//! - Tile identity and cardinal directions

/// Collapse grid and per-cell state
pub mod grid;
/// Tile identity, directions and catalog entries
pub mod tiles;

pub use grid::{Cell, CellState, CollapseGrid};
