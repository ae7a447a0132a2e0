//! Tests for the collapse engine: seeding, stepping and run summaries

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::executor::StepOutcome;
    use tilecollapse::io::configuration::MAX_GRID_DIMENSION;
    use tilecollapse::spatial::CellState;
    use tilecollapse::{
        Advance, AlgorithmError, CollapseEngine, EngineConfig, SampleImage, TileCatalog,
    };

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const STRIPE: [[u8; 4]; 3] = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];

    fn checkerboard() -> TileCatalog {
        let sample =
            SampleImage::from_fn(4, 4, |x, y| if (x / 2 + y / 2) % 2 == 0 { BLACK } else { WHITE });
        TileCatalog::extract(&sample, 2).expect("checkerboard catalog")
    }

    // Three tiles in a row: nothing was ever seen above or below anything
    fn stripe() -> TileCatalog {
        let sample = SampleImage::from_fn(3, 1, |x, _| STRIPE[x]);
        TileCatalog::extract(&sample, 1).expect("stripe catalog")
    }

    fn config(rows: usize, cols: usize) -> EngineConfig {
        EngineConfig {
            rows,
            cols,
            seed: 42,
        }
    }

    // Tests construction collapses exactly the centre cell
    // Verified by seeding (0, 0) instead of the centre
    #[test]
    fn test_new_seeds_centre() {
        let engine = CollapseEngine::new(checkerboard(), EngineConfig::default())
            .expect("engine");

        assert_eq!(engine.assignments().len(), 1);
        assert_eq!(engine.cell_state(10, 10), Some(CellState::Collapsed));
        assert!(engine.assigned_tile(10, 10).is_some());
        assert_eq!(engine.entropy(10, 10), Some(-1.0));
        assert_eq!(engine.frontier().size(), 4);
        assert_eq!(engine.cell_state(0, 0), Some(CellState::Unconstrained));
        assert_eq!(engine.domain_size(0, 0), Some(0));
        assert_eq!(engine.domain_size(9, 10), Some(1));
    }

    // Tests invalid output dimensions are rejected before any work
    // Verified by removing the zero check
    #[test]
    fn test_rejects_bad_dimensions() {
        for (rows, cols) in [(0, 5), (5, 0), (MAX_GRID_DIMENSION + 1, 1)] {
            let result = CollapseEngine::new(checkerboard(), config(rows, cols));
            assert!(matches!(
                result,
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }
    }

    // Tests catalog errors surface through from_sample
    // Verified by defaulting a zero unit size to 1
    #[test]
    fn test_from_sample_propagates_catalog_errors() {
        let sample = SampleImage::from_fn(4, 4, |_, _| BLACK);
        assert!(CollapseEngine::from_sample(&sample, 0, config(2, 2)).is_err());
        assert!(CollapseEngine::from_sample(&sample, 8, config(2, 2)).is_err());
        assert!(CollapseEngine::from_sample(&sample, 2, config(2, 2)).is_ok());
    }

    // Tests a checkerboard sample reproduces a strict checkerboard
    // Verified by skipping validate_candidate
    #[test]
    fn test_checkerboard_completes() {
        let mut engine = CollapseEngine::new(checkerboard(), config(4, 4)).expect("engine");
        let summary = engine.run_to_completion().expect("run");

        assert!(summary.complete);
        assert!(summary.contradictions.is_empty());
        assert_eq!(summary.collapsed, 15);
        assert_eq!(engine.assignments().len(), 16);

        for row in 0..4 {
            for col in 0..4 {
                let tile = engine.assigned_tile(row, col).expect("collapsed");
                if col + 1 < 4 {
                    assert_ne!(Some(tile), engine.assigned_tile(row, col + 1));
                }
                if row + 1 < 4 {
                    assert_ne!(Some(tile), engine.assigned_tile(row + 1, col));
                }
            }
        }
    }

    // Tests advance keeps reporting Complete once the run is over
    // Verified by returning Contradiction for an already collapsed target
    #[test]
    fn test_complete_is_terminal() {
        let mut engine = CollapseEngine::new(checkerboard(), config(1, 1)).expect("engine");
        assert!(engine.is_complete());
        assert_eq!(engine.advance().expect("advance"), Advance::Complete);
        assert_eq!(engine.advance().expect("advance"), Advance::Complete);
    }

    // Tests contradictions fail single cells and the run carries on
    // Verified by propagating contradiction errors out of advance
    #[test]
    fn test_contradictions_are_recoverable() {
        let mut engine = CollapseEngine::new(stripe(), config(3, 3)).expect("engine");
        let summary = engine.run_to_completion().expect("run");

        assert!(!summary.complete);
        assert!(summary.contradictions.contains(&(0, 1)));
        assert!(summary.contradictions.contains(&(2, 1)));
        assert_eq!(engine.cell_state(0, 1), Some(CellState::Contradicted));
        assert_eq!(engine.assigned_tile(0, 1), None);

        // Each failed cell is reported once
        let mut unique = summary.contradictions.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), summary.contradictions.len());
        assert_eq!(
            summary.collapsed + summary.contradictions.len(),
            summary.steps
        );
    }

    // Tests the raster scan takes over once the frontier drains
    // Verified by skipping the raster scan when the frontier is empty
    #[test]
    fn test_raster_fallback_after_frontier_drains() {
        // One column: the seed at (2, 0) empties both vertical neighbours
        let mut engine = CollapseEngine::new(stripe(), config(5, 1)).expect("engine");
        assert_eq!(engine.frontier().size(), 2);
        assert_eq!(engine.cell_state(0, 0), Some(CellState::Unconstrained));
        assert_eq!(engine.cell_state(4, 0), Some(CellState::Unconstrained));

        let mut contradicted = Vec::new();
        for _ in 0..2 {
            match engine.advance().expect("advance") {
                Advance::Contradiction { row, col } => contradicted.push((row, col)),
                other => panic!("expected a contradiction, got {other:?}"),
            }
        }
        contradicted.sort_unstable();
        assert_eq!(contradicted, vec![(1, 0), (3, 0)]);
        assert!(engine.frontier().is_empty());

        // Untouched cells are drawn from the whole catalog in raster order
        let Advance::Collapsed(first) = engine.advance().expect("advance") else {
            panic!("raster scan should collapse (0, 0)");
        };
        assert_eq!((first.row, first.col), (0, 0));
        assert!(engine.catalog().get(first.tile).is_some());

        // Frozen neighbours ignore narrowing and are never revisited
        assert!(engine.frontier().is_empty());
        assert_eq!(engine.cell_state(1, 0), Some(CellState::Contradicted));
        let Advance::Collapsed(second) = engine.advance().expect("advance") else {
            panic!("raster scan should collapse (4, 0)");
        };
        assert_eq!((second.row, second.col), (4, 0));

        assert_eq!(engine.advance().expect("advance"), Advance::Complete);
        assert_eq!(engine.assignments().len(), 3);
        assert_eq!(engine.cell_state(3, 0), Some(CellState::Contradicted));
        assert_eq!(engine.grid().collapsed_count(), 3);
    }

    // Tests a direct step on a collapsed cell changes nothing
    // Verified by re-running selection on collapsed cells
    #[test]
    fn test_collapse_cell_on_collapsed() {
        let mut engine = CollapseEngine::new(checkerboard(), config(3, 3)).expect("engine");
        let before = engine.assignments().to_vec();

        let outcome = engine.collapse_cell(1, 1).expect("step");
        assert_eq!(outcome, StepOutcome::AlreadyCollapsed);
        assert_eq!(engine.assignments(), before.as_slice());

        assert!(matches!(
            engine.collapse_cell(3, 0),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Tests a rejected step leaves the grid untouched
    // Verified by assigning before validation
    #[test]
    fn test_failed_step_does_not_mutate() {
        let mut engine = CollapseEngine::new(stripe(), config(3, 3)).expect("engine");
        let domain_before: Vec<_> = engine.grid().iter().map(|c| c.domain().clone()).collect();
        let frontier_before = engine.frontier().size();

        let err = engine.collapse_cell(0, 1).expect_err("empty domain above centre");
        assert!(err.is_contradiction());

        let domain_after: Vec<_> = engine.grid().iter().map(|c| c.domain().clone()).collect();
        assert_eq!(domain_before, domain_after);
        assert_eq!(engine.frontier().size(), frontier_before);
        assert_eq!(engine.assignments().len(), 1);
    }

    // Tests the observer sees every step and equal seeds replay equal runs
    // Verified by calling the observer only on collapses
    #[test]
    fn test_run_with_observer_and_determinism() {
        let run = |seed| {
            let mut engine = CollapseEngine::new(
                stripe(),
                EngineConfig {
                    rows: 6,
                    cols: 6,
                    seed,
                },
            )
            .expect("engine");
            let mut seen = 0;
            let summary = engine
                .run_with(|_, advance| {
                    assert_ne!(*advance, Advance::Complete);
                    seen += 1;
                })
                .expect("run");
            assert_eq!(seen, summary.collapsed + summary.contradictions.len());
            engine.assignments().to_vec()
        };

        assert_eq!(run(5), run(5));
    }
}
