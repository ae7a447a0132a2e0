//! Tests for weighted tile choice and neighbour-derived candidate sets

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::selection::{
        RandomSelector, legal_candidates, neighbour_constraint,
    };
    use tilecollapse::spatial::CollapseGrid;
    use tilecollapse::{Direction, SampleImage, TileCatalog};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn checkerboard() -> TileCatalog {
        let sample =
            SampleImage::from_fn(4, 4, |x, y| if (x / 2 + y / 2) % 2 == 0 { BLACK } else { WHITE });
        TileCatalog::extract(&sample, 2).expect("checkerboard catalog")
    }

    // Tests draws follow occurrence counts
    // Verified by drawing uniformly over candidate slots
    #[test]
    fn test_weighted_slot_follows_occurrence() {
        // Three black tiles to one white
        let sample = SampleImage::from_fn(4, 1, |x, _| if x < 3 { BLACK } else { WHITE });
        let catalog = TileCatalog::extract(&sample, 1).expect("catalog");
        let mut selector = RandomSelector::new(7);

        let draws = 4000;
        let black = (0..draws)
            .filter_map(|_| selector.weighted_slot(&catalog.all_slots(), &catalog))
            .filter(|&slot| slot == 0)
            .count();
        let share = black as f64 / f64::from(draws);
        assert!((share - 0.75).abs() < 0.05, "black share {share}");
    }

    // Tests only candidate slots are returned and empty sets yield nothing
    // Verified by iterating the whole catalog instead of the candidates
    #[test]
    fn test_weighted_slot_respects_candidates() {
        let catalog = checkerboard();
        let mut selector = RandomSelector::new(1);

        let mut only_white = TileBitset::new(catalog.len());
        only_white.insert(1);
        for _ in 0..50 {
            assert_eq!(selector.weighted_slot(&only_white, &catalog), Some(1));
        }

        let empty = TileBitset::new(catalog.len());
        assert_eq!(selector.weighted_slot(&empty, &catalog), None);
    }

    // Tests equal seeds produce equal draw sequences
    // Verified by seeding from entropy instead of the given seed
    #[test]
    fn test_seeded_determinism() {
        let catalog = checkerboard();
        let mut a = RandomSelector::new(99);
        let mut b = RandomSelector::new(99);

        let seq_a: Vec<_> = (0..32)
            .map(|_| a.weighted_slot(&catalog.all_slots(), &catalog))
            .collect();
        let seq_b: Vec<_> = (0..32)
            .map(|_| b.weighted_slot(&catalog.all_slots(), &catalog))
            .collect();
        assert_eq!(seq_a, seq_b);
    }

    // Tests collapsed, constrained and untouched neighbours
    // Verified by reading the neighbour's set in `direction` instead of its opposite
    #[test]
    fn test_neighbour_constraint() {
        let catalog = checkerboard();
        let black = catalog.id_of(0).expect("black tile");
        let mut grid = CollapseGrid::new(3, 3, catalog.len());
        grid.cell_mut(1, 1).expect("centre").assign(black);

        // (1, 2) sees the black centre on its left
        let allowed = neighbour_constraint(&grid, &catalog, 1, 2, Direction::Left)
            .expect("collapsed neighbour constrains");
        assert_eq!(allowed.to_vec(), vec![1]);

        // Untouched neighbour and grid edge impose nothing
        assert!(neighbour_constraint(&grid, &catalog, 1, 2, Direction::Up).is_none());
        assert!(neighbour_constraint(&grid, &catalog, 1, 2, Direction::Right).is_none());

        // A constrained neighbour contributes the union over its domain
        let both = TileBitset::all(catalog.len());
        grid.cell_mut(0, 0).expect("corner").narrow(&both);
        let allowed = neighbour_constraint(&grid, &catalog, 0, 1, Direction::Left)
            .expect("constrained neighbour constrains");
        assert_eq!(allowed.to_vec(), vec![0, 1]);
    }

    // Tests the domain is filtered by every touched neighbour
    // Verified by returning the raw domain
    #[test]
    fn test_legal_candidates() {
        let catalog = checkerboard();
        let black = catalog.id_of(0).expect("black tile");
        let mut grid = CollapseGrid::new(3, 3, catalog.len());

        grid.cell_mut(1, 2)
            .expect("cell")
            .narrow(&TileBitset::all(catalog.len()));
        assert_eq!(legal_candidates(&grid, &catalog, 1, 2).to_vec(), vec![0, 1]);

        grid.cell_mut(1, 1).expect("centre").assign(black);
        assert_eq!(legal_candidates(&grid, &catalog, 1, 2).to_vec(), vec![1]);

        assert!(legal_candidates(&grid, &catalog, 9, 9).is_empty());
    }
}
