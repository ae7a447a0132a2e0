//! Catalog sheet: every tile beside the tiles observed next to it
//!
//! One row per tile in catalog order. The tile itself comes first, followed by
//! four groups holding its left, right, up and down neighbour sets, each group
//! separated by a double gap.

use crate::analysis::catalog::TileCatalog;
use crate::io::configuration::CATALOG_SHEET_GAP;
use crate::io::error::Result;
use crate::io::image::{blit_tile, save_png};
use crate::spatial::tiles::{Direction, Tile};
use image::RgbaImage;
use std::path::Path;

/// Pixel width of one sheet row
fn row_width(tile: &Tile, unit: usize) -> usize {
    let stride = unit + CATALOG_SHEET_GAP;
    let groups: usize = Direction::ALL
        .iter()
        .map(|&direction| CATALOG_SHEET_GAP + tile.neighbours(direction).count() * stride)
        .sum();
    CATALOG_SHEET_GAP + stride + groups
}

/// Render the catalog sheet
///
/// An empty catalog yields a 1x1 transparent image.
pub fn render_catalog_sheet(catalog: &TileCatalog) -> RgbaImage {
    let unit = catalog.unit_size();
    let stride = unit + CATALOG_SHEET_GAP;

    let width = catalog
        .tiles()
        .iter()
        .map(|tile| row_width(tile, unit))
        .max()
        .unwrap_or(1);
    let height = (CATALOG_SHEET_GAP + catalog.len() * stride).max(1);
    let mut img = RgbaImage::new(width as u32, height as u32);

    for (index, tile) in catalog.tiles().iter().enumerate() {
        let y = CATALOG_SHEET_GAP + index * stride;
        let mut x = CATALOG_SHEET_GAP;

        blit_tile(&mut img, tile.pixels(), unit, x, y);
        x += stride;

        for direction in Direction::ALL {
            x += CATALOG_SHEET_GAP;
            for neighbour in tile
                .neighbours(direction)
                .iter()
                .filter_map(|slot| catalog.tile(slot))
            {
                blit_tile(&mut img, neighbour.pixels(), unit, x, y);
                x += stride;
            }
        }
    }

    img
}

/// Render the catalog sheet and write it as a PNG
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn export_catalog_sheet(catalog: &TileCatalog, output_path: &Path) -> Result<()> {
    save_png(&render_catalog_sheet(catalog), output_path)
}
