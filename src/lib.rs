//! Wave function collapse over content-hashed pixel tiles
//!
//! A sample image is cut into fixed-size unit tiles, each identified by a hash of
//! its pixel bytes. Observed adjacencies become per-direction constraints, and a
//! collapse engine resolves an output grid cell by cell, always picking the
//! lowest-entropy cell next and narrowing its neighbours without backtracking.

#![forbid(unsafe_code)]

/// Collapse engine: frontier scheduling, candidate selection and propagation
pub mod algorithm;
/// Sample image handling and tile catalog extraction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Hashing and information-theory helpers
pub mod math;
/// Grid cells, tiles and directions
pub mod spatial;

pub use algorithm::executor::{Advance, Assignment, CollapseEngine, EngineConfig};
pub use analysis::catalog::TileCatalog;
pub use analysis::sample::SampleImage;
pub use io::error::{AlgorithmError, Result};
pub use spatial::tiles::{Direction, TileId};
