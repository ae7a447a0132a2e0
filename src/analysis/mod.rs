//! Sample handling and tile catalog extraction

/// Tile catalog extraction with occurrence statistics and adjacency sets
pub mod catalog;
/// Raw RGBA sample buffers and image loading
pub mod sample;
