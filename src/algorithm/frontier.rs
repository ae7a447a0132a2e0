//! Entropy-ordered frontier of cells awaiting resolution
//!
//! A binary min-heap over (cell handle, entropy) pairs with a handle-indexed
//! position table, so priorities can be changed in place. Ties between equal
//! entropies fall out of the heap layout: deterministic for a fixed sequence of
//! operations, otherwise unspecified.

use crate::spatial::grid::CellHandle;

/// Outcome of a priority update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityUpdate {
    /// The cell was present and has been repositioned
    Updated,
    /// The cell is not in the frontier; nothing changed
    NotFound,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: CellHandle,
    entropy: f64,
}

/// Min-heap of cells keyed by entropy
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    positions: Vec<Option<usize>>,
}

impl Frontier {
    /// Create a frontier able to hold handles below `capacity` without resizing
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Number of queued cells
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// Whether no cells are queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether a cell is queued
    pub fn contains(&self, handle: CellHandle) -> bool {
        self.position_of(handle).is_some()
    }

    /// Queued entropy of a cell
    pub fn priority_of(&self, handle: CellHandle) -> Option<f64> {
        self.position_of(handle)
            .and_then(|index| self.heap.get(index))
            .map(|entry| entry.entropy)
    }

    /// Queue a cell
    ///
    /// Inserting a handle that is already queued repositions it instead of
    /// creating a duplicate.
    pub fn insert(&mut self, handle: CellHandle, entropy: f64) {
        if self.update_priority(handle, entropy) == PriorityUpdate::Updated {
            return;
        }

        if handle >= self.positions.len() {
            self.positions.resize(handle + 1, None);
        }

        let index = self.heap.len();
        self.heap.push(Entry { handle, entropy });
        self.set_position(handle, Some(index));
        self.sift_up(index);
    }

    /// Remove and return the lowest-entropy cell
    pub fn extract_min(&mut self) -> Option<CellHandle> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let min = self.heap.pop()?;
        self.set_position(min.handle, None);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some(min.handle)
    }

    /// Lowest-entropy cell without removing it
    pub fn peek(&self) -> Option<CellHandle> {
        self.heap.first().map(|entry| entry.handle)
    }

    /// Change the entropy of a queued cell
    pub fn update_priority(&mut self, handle: CellHandle, entropy: f64) -> PriorityUpdate {
        let Some(index) = self.position_of(handle) else {
            return PriorityUpdate::NotFound;
        };
        let Some(entry) = self.heap.get_mut(index) else {
            return PriorityUpdate::NotFound;
        };

        let previous = entry.entropy;
        entry.entropy = entropy;

        if entropy < previous {
            self.sift_up(index);
        } else if entropy > previous {
            self.sift_down(index);
        }

        PriorityUpdate::Updated
    }

    fn position_of(&self, handle: CellHandle) -> Option<usize> {
        self.positions.get(handle).copied().flatten()
    }

    fn set_position(&mut self, handle: CellHandle, index: Option<usize>) {
        if let Some(slot) = self.positions.get_mut(handle) {
            *slot = index;
        }
    }

    fn entropy_at(&self, index: usize) -> f64 {
        self.heap.get(index).map_or(f64::INFINITY, |entry| entry.entropy)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        for index in [a, b] {
            if let Some(handle) = self.heap.get(index).map(|entry| entry.handle) {
                self.set_position(handle, Some(index));
            }
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entropy_at(index) >= self.entropy_at(parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.entropy_at(left) < self.entropy_at(smallest) {
                smallest = left;
            }
            if right < len && self.entropy_at(right) < self.entropy_at(smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.swap(index, smallest);
            index = smallest;
        }
    }
}
