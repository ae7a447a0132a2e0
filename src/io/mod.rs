//! Input/output, configuration and error handling

/// Catalog sheet export
pub mod analysis;
/// Command-line interface and batch file processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Rendering of collapsed grids to PNG
pub mod image;
/// Log output setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Collapse-order GIF capture
pub mod visualization;
