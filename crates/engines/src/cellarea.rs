//! Per-cell area rasters
//!
//! Land-cover areas are reported in hectares, so cell areas must be real
//! ground areas. Geographic (degree) grids get the spherical band formula
//! per row; projected grids are planar and every cell has the same area.

use geozonal_core::{Raster, RasterElement};

/// IUGG mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_008.8;

const M2_PER_HA: f64 = 10_000.0;

/// Per-cell ground area in square meters, on the grid of `template`.
///
/// A grid is treated as geographic when its CRS says so; without a CRS the
/// coordinates are assumed planar (projected) and areas are
/// `|pixel_width * pixel_height|`.
pub fn cell_area_m2<T: RasterElement>(template: &Raster<T>) -> Raster<f64> {
    let (rows, cols) = template.shape();
    let t = *template.transform();
    let mut out: Raster<f64> = template.with_same_meta();

    let geographic = template.crs().is_some_and(|c| c.is_geographic());

    if !geographic {
        let area = (t.pixel_width * t.pixel_height).abs();
        for row in 0..rows {
            for col in 0..cols {
                unsafe { out.set_unchecked(row, col, area) };
            }
        }
        return out;
    }

    // Spherical band area: R^2 * dlon * |sin(lat_top) - sin(lat_bottom)|,
    // constant along a row.
    let dlon = t.pixel_width.abs().to_radians();
    for row in 0..rows {
        let lat_top = (t.origin_y + row as f64 * t.pixel_height).clamp(-90.0, 90.0);
        let lat_bottom = (t.origin_y + (row + 1) as f64 * t.pixel_height).clamp(-90.0, 90.0);
        let band = EARTH_RADIUS_M * EARTH_RADIUS_M
            * dlon
            * (lat_top.to_radians().sin() - lat_bottom.to_radians().sin()).abs();
        for col in 0..cols {
            unsafe { out.set_unchecked(row, col, band) };
        }
    }
    out
}

/// Per-cell ground area in hectares
pub fn cell_area_ha<T: RasterElement>(template: &Raster<T>) -> Raster<f64> {
    let mut out = cell_area_m2(template);
    out.data_mut().mapv_inplace(|v| v / M2_PER_HA);
    out
}
