use crate::{
    algorithm::{
        frontier::Frontier,
        propagation::{propagate, validate_candidate},
        selection::{RandomSelector, legal_candidates},
    },
    analysis::{catalog::TileCatalog, sample::SampleImage},
    io::configuration::{DEFAULT_OUTPUT_COLS, DEFAULT_OUTPUT_ROWS, DEFAULT_SEED, MAX_GRID_DIMENSION},
    io::error::{Result, contradiction, invalid_parameter},
    spatial::{CellState, CollapseGrid, tiles::TileId},
};
use log::{debug, info, warn};

/// Output grid dimensions and seed for one run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of output rows
    pub rows: usize,
    /// Number of output columns
    pub cols: usize,
    /// Seed for every random choice of the run
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_OUTPUT_ROWS,
            cols: DEFAULT_OUTPUT_COLS,
            seed: DEFAULT_SEED,
        }
    }
}

/// A tile committed to a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Row of the collapsed cell
    pub row: usize,
    /// Column of the collapsed cell
    pub col: usize,
    /// Tile placed there
    pub tile: TileId,
}

/// Result of a single step on a chosen cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cell received a tile
    Collapsed(Assignment),
    /// The cell already held a tile; nothing changed
    AlreadyCollapsed,
}

/// Result of one scheduled step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A cell received a tile
    Collapsed(Assignment),
    /// The scheduled cell had no legal tile; it stays unresolved
    Contradiction {
        /// Row of the contradicted cell
        row: usize,
        /// Column of the contradicted cell
        col: usize,
    },
    /// Nothing left to schedule
    Complete,
}

/// Totals of a run to completion
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Scheduled steps taken, successful or not
    pub steps: usize,
    /// Cells collapsed during the run
    pub collapsed: usize,
    /// Cells left unresolved by contradictions, in the order they failed
    pub contradictions: Vec<(usize, usize)>,
    /// Whether every cell holds a tile
    pub complete: bool,
}

/// Wave function collapse session
///
/// Owns the catalog, grid, frontier and random state of one run. The centre
/// cell is collapsed on construction; every later step is taken through
/// [`CollapseEngine::advance`], which pulls the lowest-entropy cell from the
/// frontier or, when the frontier is empty, the next unresolved cell in raster
/// order.
#[derive(Debug, Clone)]
pub struct CollapseEngine {
    catalog: TileCatalog,
    grid: CollapseGrid,
    frontier: Frontier,
    random_selector: RandomSelector,
    raster_cursor: usize,
    assignments: Vec<Assignment>,
    steps: usize,
}

impl CollapseEngine {
    /// Start a run over an extracted catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either output dimension is zero or above `MAX_GRID_DIMENSION`
    /// - The catalog is empty
    pub fn new(catalog: TileCatalog, config: EngineConfig) -> Result<Self> {
        for (parameter, value) in [("rows", config.rows), ("cols", config.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &"empty",
                &"at least one tile is required",
            ));
        }

        let grid = CollapseGrid::new(config.rows, config.cols, catalog.len());
        let frontier = Frontier::new(grid.len());

        let mut engine = Self {
            catalog,
            grid,
            frontier,
            random_selector: RandomSelector::new(config.seed),
            raster_cursor: 0,
            assignments: Vec::with_capacity(config.rows * config.cols),
            steps: 0,
        };

        // Seed
        let (row, col) = (config.rows / 2, config.cols / 2);
        engine.collapse_cell(row, col)?;
        debug!("seeded centre cell ({row}, {col})");

        Ok(engine)
    }

    /// Extract a catalog from a sample and start a run over it
    ///
    /// # Errors
    ///
    /// Returns an error if catalog extraction fails or the configuration is invalid
    pub fn from_sample(sample: &SampleImage, unit_size: usize, config: EngineConfig) -> Result<Self> {
        let catalog = TileCatalog::extract(sample, unit_size)?;
        Self::new(catalog, config)
    }

    /// Resolve the cell at (row, col)
    ///
    /// The step is atomic: either the candidate is chosen, validated,
    /// propagated and assigned, or nothing in the grid or frontier changes.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `Contradiction` if no legal tile remains or the pick is rejected by a
    ///   collapsed neighbour
    /// - `InvalidParameter` if (row, col) is outside the grid
    pub fn collapse_cell(&mut self, row: usize, col: usize) -> Result<StepOutcome> {
        let cell = self.grid.cell(row, col).ok_or_else(|| {
            invalid_parameter(
                "cell",
                &format!("({row}, {col})"),
                &format!("outside the {}x{} grid", self.grid.rows(), self.grid.cols()),
            )
        })?;

        // Candidate set: constrained by neighbours, or the whole catalog when untouched
        let candidates = match cell.state() {
            CellState::Collapsed => return Ok(StepOutcome::AlreadyCollapsed),
            CellState::Constrained => {
                let legal = legal_candidates(&self.grid, &self.catalog, row, col);
                if legal.is_empty() {
                    return Err(contradiction(
                        row,
                        col,
                        "neighbour constraints exclude every tile in the domain",
                    ));
                }
                legal
            }
            CellState::Unconstrained => self.catalog.all_slots(),
            CellState::Contradicted => {
                return Err(contradiction(row, col, "domain is empty"));
            }
        };

        // Nothing below mutates until validation passes
        let slot = self
            .random_selector
            .weighted_slot(&candidates, &self.catalog)
            .ok_or_else(|| contradiction(row, col, "no candidate has a positive occurrence"))?;
        validate_candidate(&self.grid, &self.catalog, row, col, slot)?;

        let tile = self
            .catalog
            .id_of(slot)
            .ok_or_else(|| contradiction(row, col, format!("slot {slot} is not in the catalog")))?;

        // Propagate to the four neighbours
        propagate(
            &mut self.grid,
            &mut self.frontier,
            &self.catalog,
            row,
            col,
            slot,
        );

        // Assign
        if let Some(cell) = self.grid.cell_mut(row, col) {
            cell.assign(tile);
        }

        let assignment = Assignment { row, col, tile };
        self.assignments.push(assignment);
        debug!("collapsed ({row}, {col}) to {tile}");

        Ok(StepOutcome::Collapsed(assignment))
    }

    /// Take exactly one scheduled step
    ///
    /// A contradiction fails only this step; the cell stays unresolved and the
    /// next call moves on.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures other than contradictions, which
    /// indicate a corrupted catalog
    pub fn advance(&mut self) -> Result<Advance> {
        while let Some((row, col)) = self.next_target() {
            self.steps += 1;

            match self.collapse_cell(row, col) {
                Ok(StepOutcome::Collapsed(assignment)) => {
                    return Ok(Advance::Collapsed(assignment));
                }
                // Stale raster target, try the next one
            Ok(StepOutcome::AlreadyCollapsed) => {}
                Err(err) if err.is_contradiction() => {
                    warn!("{err}");
                    return Ok(Advance::Contradiction { row, col });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Advance::Complete)
    }

    /// Advance until nothing is left to schedule
    ///
    /// # Errors
    ///
    /// Propagates any non-contradiction error from [`CollapseEngine::advance`]
    pub fn run_to_completion(&mut self) -> Result<RunSummary> {
        self.run_with(|_, _| {})
    }

    /// Advance until nothing is left to schedule, reporting every step
    ///
    /// The observer sees the engine after each step together with its result.
    ///
    /// # Errors
    ///
    /// Propagates any non-contradiction error from [`CollapseEngine::advance`]
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&Self, &Advance),
    {
        let mut summary = RunSummary::default();
        let steps_before = self.steps;

        loop {
            let advance = self.advance()?;
            match advance {
                Advance::Collapsed(_) => summary.collapsed += 1,
                Advance::Contradiction { row, col } => summary.contradictions.push((row, col)),
                Advance::Complete => break,
            }
            observer(self, &advance);
        }

        summary.steps = self.steps - steps_before;
        summary.complete = self.grid.is_complete();
        info!(
            "run finished: {} collapsed, {} contradictions, {}/{} cells resolved",
            summary.collapsed,
            summary.contradictions.len(),
            self.grid.collapsed_count(),
            self.grid.len()
        );

        Ok(summary)
    }

    /// Next cell to resolve: frontier minimum, else the next cell in raster
    /// order that was never attempted
    fn next_target(&mut self) -> Option<(usize, usize)> {
        // Lowest entropy first; dequeued cells are frozen for good
        if let Some(handle) = self.frontier.extract_min() {
            let (row, col) = self.grid.position(handle);
            if let Some(cell) = self.grid.cell_mut(row, col) {
                cell.freeze();
            }
            return Some((row, col));
        }

        // Frontier drained: resume the raster scan without freezing
        while self.raster_cursor < self.grid.len() {
            let (row, col) = self.grid.position(self.raster_cursor);
            self.raster_cursor += 1;
            if self
                .grid
                .cell(row, col)
                .is_some_and(|cell| !cell.is_frozen())
            {
                debug!("frontier empty, falling back to ({row}, {col})");
                return Some((row, col));
            }
        }

        None
    }

    /// The catalog this run draws from
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// The output grid
    pub const fn grid(&self) -> &CollapseGrid {
        &self.grid
    }

    /// Cells awaiting resolution
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Every assignment so far, in collapse order
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Scheduled steps taken so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Number of tiles still possible at (row, col)
    pub fn domain_size(&self, row: usize, col: usize) -> Option<usize> {
        self.grid.cell(row, col).map(|cell| cell.domain_size())
    }

    /// Entropy of (row, col)
    pub fn entropy(&self, row: usize, col: usize) -> Option<f64> {
        self.grid.cell(row, col).map(|cell| cell.entropy())
    }

    /// Tile assigned to (row, col), once collapsed
    pub fn assigned_tile(&self, row: usize, col: usize) -> Option<TileId> {
        self.grid.cell(row, col).and_then(|cell| cell.assignment())
    }

    /// Lifecycle state of (row, col)
    pub fn cell_state(&self, row: usize, col: usize) -> Option<CellState> {
        self.grid.cell(row, col).map(|cell| cell.state())
    }
}
