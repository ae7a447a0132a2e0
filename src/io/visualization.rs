//! Frame capture and GIF generation of the collapse order

use crate::algorithm::executor::Assignment;
use crate::analysis::catalog::TileCatalog;
use crate::analysis::sample::CHANNELS;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result, invalid_input};
use crate::io::image::blit_tile;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

/// Captures assignments for visualization
///
/// Records every collapse in order so the run can be replayed as an animation
/// once it has finished.
#[derive(Debug, Clone)]
pub struct VisualizationCapture {
    placements: Vec<Assignment>,
    dimensions: (usize, usize),
}

impl VisualizationCapture {
    /// Create an empty capture for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            placements: Vec::with_capacity(rows * cols),
            dimensions: (rows, cols),
        }
    }

    /// Records one collapse
    pub fn record(&mut self, assignment: Assignment) {
        self.placements.push(assignment);
    }

    /// Returns all recorded assignments
    pub fn placements(&self) -> &[Assignment] {
        &self.placements
    }

    /// Returns the total number of recorded assignments
    pub const fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Export the captured collapses as a GIF with automatic frame skipping
    ///
    /// Frame delays below `VIEWER_MIN_FRAME_DELAY_MS` are raised to it and
    /// intermediate frames dropped so the animation keeps its apparent speed.
    /// Unresolved cells show the mean colour of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No assignments were captured
    /// - A captured tile is missing from the catalog
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        catalog: &TileCatalog,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.placements.is_empty() {
            return Err(invalid_input("No tile placements captured for visualization"));
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1))
        } else {
            1
        };

        let frames = self.generate_frames(catalog, effective_delay_ms, skip_factor as usize)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(
        &self,
        catalog: &TileCatalog,
        delay_ms: u32,
        skip_factor: usize,
    ) -> Result<Vec<Frame>> {
        let unit = catalog.unit_size();
        let (rows, cols) = self.dimensions;
        let mut canvas = RgbaImage::from_pixel(
            (cols * unit) as u32,
            (rows * unit) as u32,
            Rgba(background_color(catalog)),
        );

        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        let mut frames = vec![Frame::from_parts(canvas.clone(), 0, 0, delay)];

        for (count, placement) in self.placements.iter().enumerate() {
            let tile = catalog
                .get(placement.tile)
                .ok_or(AlgorithmError::UnknownTile { id: placement.tile })?;
            blit_tile(
                &mut canvas,
                tile.pixels(),
                unit,
                placement.col * unit,
                placement.row * unit,
            );

            if (count + 1) % skip_factor == 0 {
                frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));
            }
        }

        if self.placements.len() % skip_factor != 0 {
            frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));
        }

        // Hold the finished grid on screen
        frames.push(Frame::from_parts(
            canvas,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms * 25, 1),
        ));

        Ok(frames)
    }
}

/// Mean colour over every pixel of every catalog tile
fn background_color(catalog: &TileCatalog) -> [u8; 4] {
    let mut sums = [0u64; CHANNELS];
    let mut count = 0u64;

    for rgba in catalog
        .tiles()
        .iter()
        .flat_map(|tile| tile.pixels().chunks_exact(CHANNELS))
    {
        for (sum, &channel) in sums.iter_mut().zip(rgba) {
            *sum += u64::from(channel);
        }
        count += 1;
    }

    if count == 0 {
        return [128, 128, 128, 255];
    }
    sums.map(|sum| (sum / count) as u8)
}
