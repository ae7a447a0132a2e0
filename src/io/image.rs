//! PNG export of collapsed grids, shading cells left unresolved

use crate::analysis::catalog::TileCatalog;
use crate::analysis::sample::CHANNELS;
use crate::io::configuration::{CONTRADICTION_COLOR, UNRESOLVED_ALPHA};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{Cell, CellState, CollapseGrid};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Copy a unit tile's row-major RGBA bytes into `img` with its top-left at (x, y)
///
/// Pixels falling outside the image are dropped.
pub fn blit_tile(img: &mut RgbaImage, pixels: &[u8], unit_size: usize, x: usize, y: usize) {
    if unit_size == 0 {
        return;
    }
    for (index, rgba) in pixels.chunks_exact(CHANNELS).enumerate() {
        let px = u32::try_from(x + index % unit_size);
        let py = u32::try_from(y + index / unit_size);
        if let (Ok(px), Ok(py)) = (px, py)
            && let (Some(pixel), &[r, g, b, a]) = (img.get_pixel_mut_checked(px, py), rgba)
        {
            *pixel = Rgba([r, g, b, a]);
        }
    }
}

/// Fill the unit square with its top-left at (x, y), clipped to the image
pub fn fill_cell(img: &mut RgbaImage, color: Rgba<u8>, unit_size: usize, x: usize, y: usize) {
    for dy in 0..unit_size {
        for dx in 0..unit_size {
            if let (Ok(px), Ok(py)) = (u32::try_from(x + dx), u32::try_from(y + dy))
                && let Some(pixel) = img.get_pixel_mut_checked(px, py)
            {
                *pixel = color;
            }
        }
    }
}

/// Shade for a cell without an assignment, if it gets one
///
/// Constrained cells are grey, brighter the more tiles they still allow.
/// Contradicted cells get a solid marker colour. Untouched cells have none.
pub fn unresolved_shade(cell: &Cell, tile_count: usize) -> Option<Rgba<u8>> {
    match cell.state() {
        CellState::Constrained => {
            let level = (cell.domain_size() * 255 / tile_count.max(1)).min(255) as u8;
            Some(Rgba([level, level, level, UNRESOLVED_ALPHA]))
        }
        CellState::Contradicted => Some(Rgba(CONTRADICTION_COLOR)),
        CellState::Collapsed | CellState::Unconstrained => None,
    }
}

/// Paint the grid onto a transparent canvas
///
/// The canvas is `cols * unit_size` by `rows * unit_size` pixels. Collapsed
/// cells show their tile, unresolved cells their [`unresolved_shade`], and
/// untouched cells stay fully transparent.
///
/// # Errors
///
/// Returns `UnknownTile` if a cell holds a tile missing from the catalog
pub fn render_grid(grid: &CollapseGrid, catalog: &TileCatalog) -> Result<RgbaImage> {
    let unit = catalog.unit_size();
    let mut img = RgbaImage::new((grid.cols() * unit) as u32, (grid.rows() * unit) as u32);

    for cell in grid.iter() {
        let Some(id) = cell.assignment() else {
            if let Some(shade) = unresolved_shade(cell, catalog.len()) {
                fill_cell(&mut img, shade, unit, cell.col() * unit, cell.row() * unit);
            }
            continue;
        };
        let tile = catalog.get(id).ok_or(AlgorithmError::UnknownTile { id })?;
        blit_tile(&mut img, tile.pixels(), unit, cell.col() * unit, cell.row() * unit);
    }

    Ok(img)
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Render the grid and write it as a PNG
///
/// # Errors
///
/// Returns an error if rendering or saving fails
pub fn export_grid_as_png(
    grid: &CollapseGrid,
    catalog: &TileCatalog,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, catalog)?;
    save_png(&img, output_path)
}
