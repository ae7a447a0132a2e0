//! Mathematical utilities for the algorithm

/// Content hashing for tile identity
pub mod hash;
/// Entropy and probability helpers
pub mod probability;
