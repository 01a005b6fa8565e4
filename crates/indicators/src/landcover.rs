//! Land-cover indicator
//!
//! Area and share of each land-cover class inside an AOI, per yearly
//! layer. There is no statistic parameter: the output is always
//! area-weighted class sums in hectares plus their share of the total
//! masked area.

use std::collections::{BTreeMap, BTreeSet};

use geozonal_core::{Feature, RasterStack, Result, Table, Value};
use geozonal_engines::{apply_mask, cell_area_ha, rasterize_mask};
use tracing::debug;

use crate::layer_meta::parse_layer_year;

/// Land-cover class codes and names (Copernicus global land cover,
/// discrete classification)
pub const LANDCOVER_CLASSES: [(i64, &str); 23] = [
    (0, "no_data"),
    (20, "shrubs"),
    (30, "herbaceous_vegetation"),
    (40, "cropland"),
    (50, "built_up"),
    (60, "bare_sparse_vegetation"),
    (70, "snow_and_ice"),
    (80, "permanent_water_bodies"),
    (90, "herbaceous_wetland"),
    (100, "moss_and_lichen"),
    (111, "closed_forest_evergreen_needle_leaf"),
    (112, "closed_forest_evergreen_broad_leaf"),
    (113, "closed_forest_deciduous_needle_leaf"),
    (114, "closed_forest_deciduous_broad_leaf"),
    (115, "closed_forest_mixed"),
    (116, "closed_forest_unknown"),
    (121, "open_forest_evergreen_needle_leaf"),
    (122, "open_forest_evergreen_broad_leaf"),
    (123, "open_forest_deciduous_needle_leaf"),
    (124, "open_forest_deciduous_broad_leaf"),
    (125, "open_forest_mixed"),
    (126, "open_forest_unknown"),
    (200, "open_sea"),
];

/// Class name for a raster code.
///
/// Codes outside the classification are reported, not dropped; see
/// [`landcover_class_area`].
pub fn class_name(code: i64) -> Option<&'static str> {
    LANDCOVER_CLASSES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Compute per-class land-cover areas for one AOI.
///
/// Returns `Ok(None)` when the raster resource is absent. Otherwise the
/// raster is masked to the polygon (pixel-center test), cell areas are
/// computed in hectares, and for every layer the masked cell areas are
/// summed per class code over the union of codes present in the masked
/// stack. A code missing from one year gets a zero-area row there, so
/// every year block lists the same classes.
///
/// Codes not in [`LANDCOVER_CLASSES`] are surfaced with class name
/// `"unknown"` rather than dropped; dropping them would make the class
/// shares no longer sum to one.
///
/// Output columns: `classes`, `year`, `area` (ha), `percentage`.
pub fn landcover_class_area(
    feature: &Feature,
    resource: Option<&RasterStack>,
) -> Result<Option<Table>> {
    let Some(stack) = resource else {
        debug!("land-cover resource absent, returning no-data");
        return Ok(None);
    };

    let grid = stack.grid()?;
    let mask = rasterize_mask(feature.geometry(), grid);
    let area_ha = apply_mask(&cell_area_ha(grid), &mask)?;

    let (rows, cols) = grid.shape();
    let mut masked_cells = Vec::new();
    let mut total_area = 0.0;
    for row in 0..rows {
        for col in 0..cols {
            let area = unsafe { area_ha.get_unchecked(row, col) };
            if !area.is_nan() {
                masked_cells.push((row, col));
                total_area += area;
            }
        }
    }

    // Union of class codes present anywhere in the masked stack
    let mut codes: BTreeSet<i64> = BTreeSet::new();
    for layer in stack.iter() {
        let grid = layer.grid();
        for &(row, col) in &masked_cells {
            let v = unsafe { grid.get_unchecked(row, col) };
            if !grid.is_nodata(v) {
                codes.insert(v.round() as i64);
            }
        }
    }

    if codes.is_empty() {
        debug!("no masked land-cover cells, returning empty table");
        return empty_table().map(Some);
    }

    let mut per_year = Vec::with_capacity(stack.len());
    for layer in stack.iter() {
        let grid = layer.grid();
        let mut sums: BTreeMap<i64, f64> = codes.iter().map(|&c| (c, 0.0)).collect();

        for &(row, col) in &masked_cells {
            let v = unsafe { grid.get_unchecked(row, col) };
            if grid.is_nodata(v) {
                continue;
            }
            let code = v.round() as i64;
            if let Some(area) = sums.get_mut(&code) {
                *area += unsafe { area_ha.get_unchecked(row, col) };
            }
        }

        let year = match parse_layer_year(layer.name()) {
            Some(y) => Value::Int(y as i64),
            None => Value::Null,
        };

        let mut table = Table::new();
        table.push_column(
            "classes",
            sums.keys()
                .map(|&code| Value::from(class_name(code).unwrap_or("unknown")))
                .collect(),
        )?;
        table.push_column("year", vec![year; sums.len()])?;
        table.push_floats("area", sums.values().copied().collect())?;
        table.push_floats(
            "percentage",
            sums.values().map(|&a| a / total_area).collect(),
        )?;
        per_year.push(table);
    }

    Table::vstack(per_year).map(Some)
}

fn empty_table() -> Result<Table> {
    let mut table = Table::new();
    for name in ["classes", "year", "area", "percentage"] {
        table.push_column(name, Vec::new())?;
    }
    Ok(table)
}
