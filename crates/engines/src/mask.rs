//! Polygon masking
//!
//! Restricts a raster to the cells covered by an AOI polygon. Masking
//! always produces a fresh raster; the input is never mutated.

use geo_types::Geometry;
use geozonal_core::{Error, Raster, Result};

use crate::coverage::rasterize_mask;

fn masked_copy(grid: &Raster<f64>, mask: &Raster<u8>) -> Raster<f64> {
    let (rows, cols) = grid.shape();
    let mut out = grid.clone();
    out.set_nodata(Some(f64::NAN));
    for row in 0..rows {
        for col in 0..cols {
            if unsafe { mask.get_unchecked(row, col) } == 0 {
                unsafe { out.set_unchecked(row, col, f64::NAN) };
            }
        }
    }
    out
}

/// Apply a 0/1 mask: cells where the mask is 0 become NaN
pub fn apply_mask(grid: &Raster<f64>, mask: &Raster<u8>) -> Result<Raster<f64>> {
    if grid.shape() != mask.shape() {
        let (rows, cols) = grid.shape();
        let (mrows, mcols) = mask.shape();
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: mrows,
            ac: mcols,
        });
    }
    Ok(masked_copy(grid, mask))
}

/// Mask a raster to a polygon by pixel-center test
pub fn mask_to_polygon(grid: &Raster<f64>, geom: &Geometry<f64>) -> Raster<f64> {
    let mask = rasterize_mask(geom, grid);
    masked_copy(grid, &mask)
}
