use crate::{
    algorithm::bitset::TileBitset,
    analysis::catalog::TileCatalog,
    spatial::{CellState, CollapseGrid, tiles::Direction},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Occurrence-weighted pick among candidate slots
    ///
    /// Draws uniformly in `[0, total occurrence)` and returns the first slot, in
    /// catalog order, whose cumulative occurrence exceeds the draw. Returns
    /// `None` when no candidate has a positive occurrence.
    pub fn weighted_slot(
        &mut self,
        candidates: &TileBitset,
        catalog: &TileCatalog,
    ) -> Option<usize> {
        let occurrence = |slot: usize| catalog.tile(slot).map_or(0, |tile| tile.occurrence());

        let total: usize = candidates.iter().map(occurrence).sum();
        if total == 0 {
            return None;
        }

        let draw = self.rng.random_range(0..total);
        let mut cumulative = 0;
        for slot in candidates.iter() {
            cumulative += occurrence(slot);
            if cumulative > draw {
                return Some(slot);
            }
        }
        None
    }
}

/// Tiles allowed at (row, col) by the neighbour in `direction`
///
/// A collapsed neighbour contributes the opposite-direction set of its tile; a
/// constrained neighbour contributes the union of the opposite-direction sets
/// of every tile still in its domain. Untouched neighbours, contradicted
/// neighbours and positions outside the grid impose nothing.
pub fn neighbour_constraint(
    grid: &CollapseGrid,
    catalog: &TileCatalog,
    row: usize,
    col: usize,
    direction: Direction,
) -> Option<TileBitset> {
    let (r, c) = direction.step(row, col, grid.rows(), grid.cols())?;
    let neighbour = grid.cell(r, c)?;
    let facing = direction.opposite();

    match neighbour.state() {
        CellState::Collapsed => {
            let tile = neighbour.assignment().and_then(|id| catalog.get(id))?;
            Some(tile.neighbours(facing).clone())
        }
        CellState::Constrained => {
            let mut allowed = TileBitset::new(catalog.len());
            for slot in neighbour.domain().iter() {
                if let Some(tile) = catalog.tile(slot) {
                    allowed.union_with(tile.neighbours(facing));
                }
            }
            Some(allowed)
        }
        CellState::Unconstrained | CellState::Contradicted => None,
    }
}

/// Domain of (row, col) filtered by every touched neighbour
///
/// Returns an empty set when the constraints leave nothing, or when the cell is
/// outside the grid.
pub fn legal_candidates(
    grid: &CollapseGrid,
    catalog: &TileCatalog,
    row: usize,
    col: usize,
) -> TileBitset {
    let Some(cell) = grid.cell(row, col) else {
        return TileBitset::new(catalog.len());
    };

    let mut candidates = cell.domain().clone();
    for direction in Direction::ALL {
        if candidates.is_empty() {
            break;
        }
        if let Some(allowed) = neighbour_constraint(grid, catalog, row, col, direction) {
            candidates.intersect_with(&allowed);
        }
    }
    candidates
}
