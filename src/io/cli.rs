//! Command-line interface for batch processing PNG samples into collapsed grids

use crate::algorithm::executor::{Advance, CollapseEngine, EngineConfig};
use crate::analysis::sample::{SampleImage, SampleWindow};
use crate::io::analysis::export_catalog_sheet;
use crate::io::configuration::{
    CATALOG_SHEET_SUFFIX, DEFAULT_OUTPUT_COLS, DEFAULT_OUTPUT_ROWS, DEFAULT_SEED,
    DEFAULT_UNIT_SIZE, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile grids from a sample image by wave function collapse"
)]
/// Command-line arguments for the tile collapse tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Edge length in pixels of one unit tile
    #[arg(short, long, default_value_t = DEFAULT_UNIT_SIZE)]
    pub unit_size: usize,

    /// Number of output rows
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_ROWS)]
    pub rows: usize,

    /// Number of output columns
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_COLS)]
    pub cols: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Left edge of the sample window in pixels
    #[arg(long, default_value_t = 0)]
    pub sample_x: usize,

    /// Top edge of the sample window in pixels
    #[arg(long, default_value_t = 0)]
    pub sample_y: usize,

    /// Edge length of a square sample window (defaults to the rest of the image)
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Export the collapse order as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Export a sheet showing every tile with its observed neighbours
    #[arg(long)]
    pub catalog_sheet: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log run summaries in addition to warnings
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine settings taken from the arguments
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
        }
    }

    /// Sample window for an image of the given size, if one was requested
    ///
    /// Without `--sample-size` the window runs from the offset to the image
    /// edges. Returns `None` when the whole image is the sample.
    pub fn sample_window(&self, width: usize, height: usize) -> Option<SampleWindow> {
        if self.sample_x == 0 && self.sample_y == 0 && self.sample_size.is_none() {
            return None;
        }

        Some(SampleWindow {
            x: self.sample_x,
            y: self.sample_y,
            width: self
                .sample_size
                .unwrap_or_else(|| width.saturating_sub(self.sample_x)),
            height: self
                .sample_size
                .unwrap_or_else(|| height.saturating_sub(self.sample_y)),
        })
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a PNG image",
                ));
            }
            Ok(self
                .should_process_file(target)
                .then(|| target.clone())
                .into_iter()
                .collect())
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| AlgorithmError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_png(&path) && !is_generated_output(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if Self::output_path(input_path).exists() {
            warn!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let loaded = SampleImage::from_png_path(input_path)?;
        let sample = match self.cli.sample_window(loaded.width(), loaded.height()) {
            Some(window) => loaded.crop(window)?,
            None => loaded,
        };

        let config = self.cli.engine_config();
        let mut engine = CollapseEngine::from_sample(&sample, self.cli.unit_size, config)?;
        info!(
            "{}: {} unique tiles from {} positions",
            input_path.display(),
            engine.catalog().len(),
            engine.catalog().total_positions()
        );

        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(config.rows, config.cols));
        if let Some(ref mut recorder) = capture {
            for assignment in engine.assignments() {
                recorder.record(*assignment);
            }
        }

        let progress = &mut self.progress_manager;
        if let Some(pm) = progress.as_mut() {
            pm.start_file(index, input_path, engine.grid().len());
            pm.update_resolved(index, engine.assignments().len());
        }

        let summary = engine.run_with(|session, advance| {
            if let (Advance::Collapsed(assignment), Some(recorder)) = (advance, capture.as_mut()) {
                recorder.record(*assignment);
            }
            if let Some(pm) = progress.as_mut() {
                pm.update_resolved(index, session.assignments().len());
            }
        })?;

        if !summary.complete {
            warn!(
                "{}: {} cells left unresolved by contradictions",
                input_path.display(),
                summary.contradictions.len()
            );
        }

        export_grid_as_png(engine.grid(), engine.catalog(), &Self::output_path(input_path))?;

        if let Some(recorder) = capture {
            recorder.export_gif(
                engine.catalog(),
                &Self::visualization_path(input_path),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if self.cli.catalog_sheet {
            export_catalog_sheet(engine.catalog(), &Self::catalog_sheet_path(input_path))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        info!(
            "{}: finished in {:.2?} after {} steps",
            input_path.display(),
            start_time.elapsed(),
            summary.steps
        );

        Ok(())
    }

    /// Path of the rendered grid for an input file
    pub fn output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Path of the collapse-order animation for an input file
    pub fn visualization_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, VISUALIZATION_SUFFIX, "gif")
    }

    /// Path of the catalog sheet for an input file
    pub fn catalog_sheet_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, CATALOG_SHEET_SUFFIX, "png")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Results from earlier runs share the input directory
fn is_generated_output(path: &Path) -> bool {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(CATALOG_SHEET_SUFFIX)
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    match input_path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
