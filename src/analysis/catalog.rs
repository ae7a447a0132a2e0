//! Tile catalog extraction
//!
//! Cuts a sample into non-overlapping unit tiles, deduplicates them by content
//! hash and records, per direction, which tiles were seen next to each other.
//! Tiles live in a dense arena ("catalog order") so domains and adjacency sets
//! can be bitsets over slots; the content hash stays the public identity.

use crate::algorithm::bitset::TileBitset;
use crate::analysis::sample::SampleImage;
use crate::io::error::{AlgorithmError, Result, invalid_input, invalid_parameter};
use crate::spatial::tiles::{Direction, Tile, TileId};
use log::{debug, info};
use ndarray::Array2;
use std::collections::HashMap;

/// Unique tiles of a sample with occurrence statistics and adjacency sets
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
    slots: HashMap<TileId, usize>,
    unit_size: usize,
    sample_dims: (usize, usize),
}

/// Walks the sample once, registering tiles on first sight
struct Registration<'a> {
    sample: &'a SampleImage,
    unit_size: usize,
    position_slots: Array2<Option<usize>>,
    tiles: Vec<Tile>,
    slots: HashMap<TileId, usize>,
}

impl Registration<'_> {
    /// Slot of the tile at a sample position, registering it if unseen
    fn slot_at(&mut self, row: usize, col: usize) -> Result<usize> {
        if let Some(&Some(slot)) = self.position_slots.get((row, col)) {
            return Ok(slot);
        }

        let pixels = self
            .sample
            .block(
                col * self.unit_size,
                row * self.unit_size,
                self.unit_size,
                self.unit_size,
            )
            .ok_or_else(|| invalid_input(format!("tile ({row}, {col}) lies outside the sample")))?;
        let id = TileId::from_pixels(&pixels);

        let slot = match self.slots.get(&id) {
            Some(&slot) => slot,
            None => {
                let slot = self.tiles.len();
                self.tiles.push(Tile {
                    id,
                    pixels,
                    occurrence: 0,
                    probability: 0.0,
                    neighbours: std::array::from_fn(|_| TileBitset::new(0)),
                });
                self.slots.insert(id, slot);
                slot
            }
        };

        if let Some(entry) = self.position_slots.get_mut((row, col)) {
            *entry = Some(slot);
        }
        Ok(slot)
    }
}

impl TileCatalog {
    /// Extract the catalog from a sample cut into `unit_size` square tiles
    ///
    /// Partial tiles at the right and bottom edges are ignored. Tiles are
    /// registered in the order the walk first meets them: for each position in
    /// raster order, the tile itself, then its left, right, up and down
    /// neighbours. Probabilities are written in a final pass once the number of
    /// sampled positions is fixed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `unit_size` is zero
    /// - The sample has zero area or is smaller than one unit tile
    pub fn extract(sample: &SampleImage, unit_size: usize) -> Result<Self> {
        if unit_size == 0 {
            return Err(invalid_parameter(
                "unit_size",
                &unit_size,
                &"unit tiles must be at least one pixel wide",
            ));
        }
        if sample.is_empty() {
            return Err(invalid_input(format!(
                "sample {}x{} has zero area",
                sample.width(),
                sample.height()
            )));
        }

        let rows = sample.height() / unit_size;
        let cols = sample.width() / unit_size;
        if rows == 0 || cols == 0 {
            return Err(invalid_input(format!(
                "sample {}x{} is smaller than one {unit_size}px tile",
                sample.width(),
                sample.height()
            )));
        }

        let mut registration = Registration {
            sample,
            unit_size,
            position_slots: Array2::from_elem((rows, cols), None),
            tiles: Vec::new(),
            slots: HashMap::new(),
        };

        // Occurrences and registration order
        for row in 0..rows {
            for col in 0..cols {
                let slot = registration.slot_at(row, col)?;
                if let Some(tile) = registration.tiles.get_mut(slot) {
                    tile.occurrence += 1;
                }

                for direction in Direction::ALL {
                    if let Some((r, c)) = direction.step(row, col, rows, cols) {
                        registration.slot_at(r, c)?;
                    }
                }
            }
        }

        let Registration {
            position_slots,
            mut tiles,
            slots,
            ..
        } = registration;

        // Adjacency, now that the slot count is known
        let tile_count = tiles.len();
        for tile in &mut tiles {
            tile.neighbours = std::array::from_fn(|_| TileBitset::new(tile_count));
        }

        for ((row, col), slot) in position_slots.indexed_iter() {
            let Some(slot) = *slot else {
                continue;
            };
            for direction in Direction::ALL {
                let Some(neighbour) = direction
                    .step(row, col, rows, cols)
                    .and_then(|pos| position_slots.get(pos).copied().flatten())
                else {
                    continue;
                };
                if let Some(tile) = tiles.get_mut(slot) {
                    tile.neighbours_mut(direction).insert(neighbour);
                }
            }
        }

        // Normalization against the final position count
        let total = (rows * cols) as f64;
        for tile in &mut tiles {
            tile.probability = tile.occurrence as f64 / total;
        }

        info!(
            "extracted {tile_count} unique tiles from {rows}x{cols} positions of {unit_size}px"
        );
        for tile in &tiles {
            debug!(
                "tile {} occurrence {} neighbours l{} r{} u{} d{}",
                tile.id,
                tile.occurrence,
                tile.neighbours(Direction::Left).count(),
                tile.neighbours(Direction::Right).count(),
                tile.neighbours(Direction::Up).count(),
                tile.neighbours(Direction::Down).count(),
            );
        }

        Ok(Self {
            tiles,
            slots,
            unit_size,
            sample_dims: (rows, cols),
        })
    }

    /// Number of unique tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Edge length of a unit tile in pixels
    pub const fn unit_size(&self) -> usize {
        self.unit_size
    }

    /// Sample size in unit tiles as (rows, cols)
    pub const fn sample_dimensions(&self) -> (usize, usize) {
        self.sample_dims
    }

    /// Number of unit-tile positions in the sample
    pub const fn total_positions(&self) -> usize {
        self.sample_dims.0 * self.sample_dims.1
    }

    /// All tiles in catalog order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile stored at a catalog slot
    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    /// Tile with the given id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slot_of(id).and_then(|slot| self.tiles.get(slot))
    }

    /// Catalog slot of a tile id
    pub fn slot_of(&self, id: TileId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    /// Tile id stored at a catalog slot
    pub fn id_of(&self, slot: usize) -> Option<TileId> {
        self.tiles.get(slot).map(Tile::id)
    }

    /// Bitset containing every slot
    pub fn all_slots(&self) -> TileBitset {
        TileBitset::all(self.tiles.len())
    }

    /// Ids of the tiles observed in `direction` from `id`, in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the catalog
    pub fn neighbour_ids(&self, id: TileId, direction: Direction) -> Result<Vec<TileId>> {
        let tile = self.get(id).ok_or(AlgorithmError::UnknownTile { id })?;
        Ok(tile
            .neighbours(direction)
            .iter()
            .filter_map(|slot| self.id_of(slot))
            .collect())
    }

    /// Whether `to` was observed in `direction` from `from`
    pub fn allows(&self, from: TileId, direction: Direction, to: TileId) -> bool {
        match (self.get(from), self.slot_of(to)) {
            (Some(tile), Some(slot)) => tile.neighbours(direction).contains(slot),
            _ => false,
        }
    }

    /// Sum of all occurrence counts
    pub fn total_occurrence(&self) -> usize {
        self.tiles.iter().map(Tile::occurrence).sum()
    }
}
