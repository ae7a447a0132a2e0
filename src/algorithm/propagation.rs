//! Candidate validation and neighbour narrowing after a collapse

use crate::{
    algorithm::{
        bitset::TileBitset,
        frontier::{Frontier, PriorityUpdate},
    },
    analysis::catalog::TileCatalog,
    io::error::{AlgorithmError, Result, contradiction},
    math::probability::shannon_entropy,
    spatial::{CollapseGrid, tiles::Direction},
};

/// Shannon entropy of a domain using each tile's global probability
pub fn domain_entropy(domain: &TileBitset, catalog: &TileCatalog) -> f64 {
    shannon_entropy(
        domain
            .iter()
            .filter_map(|slot| catalog.tile(slot))
            .map(|tile| tile.probability()),
    )
}

/// Check a candidate against every collapsed 4-neighbour
///
/// Each collapsed neighbour's tile must appear in the candidate's adjacency set
/// facing it.
///
/// # Errors
///
/// Returns a `Contradiction` naming the first direction that rejects the
/// candidate, or `UnknownTile` if a neighbour holds a tile outside the catalog
pub fn validate_candidate(
    grid: &CollapseGrid,
    catalog: &TileCatalog,
    row: usize,
    col: usize,
    candidate: usize,
) -> Result<()> {
    let tile = catalog.tile(candidate).ok_or_else(|| {
        contradiction(row, col, format!("candidate slot {candidate} is not in the catalog"))
    })?;

    for direction in Direction::ALL {
        let Some((r, c)) = direction.step(row, col, grid.rows(), grid.cols()) else {
            continue;
        };
        // Only collapsed neighbours can reject
        let Some(assigned) = grid.cell(r, c).and_then(|cell| cell.assignment()) else {
            continue;
        };

        let slot = catalog
            .slot_of(assigned)
            .ok_or(AlgorithmError::UnknownTile { id: assigned })?;
        if !tile.neighbours(direction).contains(slot) {
            return Err(contradiction(
                row,
                col,
                format!(
                    "tile {} never seen with {assigned} to its {direction}",
                    tile.id()
                ),
            ));
        }
    }

    Ok(())
}

/// Narrow the uncollapsed neighbours of (row, col) after choosing `candidate`
///
/// Each unfrozen neighbour's domain is intersected with (or, on first touch,
/// initialised to) the candidate's adjacency set facing it. Its entropy is
/// recomputed and the frontier updated, inserting the cell if it was not
/// queued. Returns the positions that were narrowed.
pub fn propagate(
    grid: &mut CollapseGrid,
    frontier: &mut Frontier,
    catalog: &TileCatalog,
    row: usize,
    col: usize,
    candidate: usize,
) -> Vec<(usize, usize)> {
    let Some(tile) = catalog.tile(candidate) else {
        return Vec::new();
    };

    let mut narrowed = Vec::with_capacity(Direction::ALL.len());
    for direction in Direction::ALL {
        let Some((r, c)) = direction.step(row, col, grid.rows(), grid.cols()) else {
            continue;
        };
        let handle = grid.handle(r, c);
        let Some(cell) = grid.cell_mut(r, c) else {
            continue;
        };

        // Frozen and collapsed neighbours keep their domain
        if !cell.narrow(tile.neighbours(direction)) {
            continue;
        }

        let entropy = domain_entropy(cell.domain(), catalog);
        cell.set_entropy(entropy);

        // An emptied domain scores 0 and surfaces as a contradiction next
        if frontier.update_priority(handle, entropy) == PriorityUpdate::NotFound {
            frontier.insert(handle, entropy);
        }
        narrowed.push((r, c));
    }

    narrowed
}
