/// Fixed-capacity bitsets over catalog slots
pub mod bitset;
/// Collapse engine driving a run step by step
pub mod executor;
/// Entropy-ordered priority queue of pending cells
pub mod frontier;
/// Candidate validation and neighbour narrowing
pub mod propagation;
/// Weighted random choice and neighbour-derived candidate sets
pub mod selection;
