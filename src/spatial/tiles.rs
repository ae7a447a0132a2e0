//! Tile identity, cardinal directions and catalog entries
//!
//! Grid orientation follows image conventions: columns grow to the right and
//! rows grow downwards, so `Up` is row - 1 and `Left` is col - 1.

use crate::algorithm::bitset::TileBitset;
use crate::math::hash::fnv1a_hash;
use std::fmt;

/// Content-addressed tile identifier
///
/// The 32-bit FNV-1a hash of the tile's raw pixel bytes. Hash collisions make
/// two different pixel blocks share one identifier; this is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Identify a pixel block by hashing its bytes
    pub fn from_pixels(pixels: &[u8]) -> Self {
        Self(fnv1a_hash(pixels))
    }

    /// The raw hash value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// One of the four cardinal neighbour directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Column - 1
    Left,
    /// Column + 1
    Right,
    /// Row - 1
    Up,
    /// Row + 1
    Down,
}

impl Direction {
    /// All directions in adjacency-table order
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// The direction pointing back from the neighbour
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Index into per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }

    /// (row, col) step taken when moving in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
        }
    }

    /// Neighbouring position inside a `rows` x `cols` area, if any
    pub const fn step(
        self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let Some(r) = row.checked_add_signed(dr) else {
            return None;
        };
        let Some(c) = col.checked_add_signed(dc) else {
            return None;
        };
        if r < rows && c < cols {
            Some((r, c))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}

/// A unique unit tile extracted from the sample
///
/// Adjacency sets hold catalog slots of tiles observed next to this one, indexed
/// by `Direction::index`. They only grow while the catalog is being extracted.
#[derive(Debug, Clone)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) pixels: Vec<u8>,
    pub(crate) occurrence: usize,
    pub(crate) probability: f64,
    pub(crate) neighbours: [TileBitset; 4],
}

impl Tile {
    /// Content hash identifying this tile
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// RGBA bytes of the first occurrence, row-major, `unit * unit * 4` long
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of sample positions holding this tile
    pub const fn occurrence(&self) -> usize {
        self.occurrence
    }

    /// Occurrence divided by the number of sampled positions
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Catalog slots observed in the given direction from this tile
    pub const fn neighbours(&self, direction: Direction) -> &TileBitset {
        let [left, right, up, down] = &self.neighbours;
        match direction {
            Direction::Left => left,
            Direction::Right => right,
            Direction::Up => up,
            Direction::Down => down,
        }
    }

    pub(crate) const fn neighbours_mut(&mut self, direction: Direction) -> &mut TileBitset {
        let [left, right, up, down] = &mut self.neighbours;
        match direction {
            Direction::Left => left,
            Direction::Right => right,
            Direction::Up => up,
            Direction::Down => down,
        }
    }
}
