//! Soil-properties indicator
//!
//! Zonal statistics of SoilGrids-style rasters over an AOI. Layer names
//! carry `{property}_{depth}_{stat}` metadata; storage units are mapped
//! to conventional units by a per-property divisor.

use geozonal_core::{Feature, RasterStack, Result, Table, Value};
use geozonal_engines::{select_engine, stat_column, Aoi, Engine, Statistic, ZonalOutput, ZonalRequest};
use tracing::{debug, warn};

use crate::layer_meta::{parse_soil_layer, SoilLayerMeta};
use crate::missing_rows_error;

/// Conversion divisors from storage units to conventional units, per
/// soil property (SoilGrids layer conventions)
pub const SOIL_CONVERSION_FACTORS: [(&str, f64); 11] = [
    ("bdod", 100.0),
    ("cec", 10.0),
    ("cfvo", 10.0),
    ("clay", 10.0),
    ("nitrogen", 100.0),
    ("ocd", 10.0),
    ("ocs", 10.0),
    ("phh2o", 10.0),
    ("sand", 10.0),
    ("silt", 10.0),
    ("soc", 10.0),
];

/// Conversion divisor for a soil property
pub fn conversion_factor(property: &str) -> Option<f64> {
    SOIL_CONVERSION_FACTORS
        .iter()
        .find(|(p, _)| *p == property)
        .map(|(_, f)| *f)
}

/// Compute soil-property statistics for one AOI (asset mode).
///
/// Returns `Ok(None)` when the raster resource is absent. Layer names
/// must parse as `{property}_{depth}_{stat}.tif`; a malformed name is a
/// hard error raised before any statistics are computed. Every requested
/// statistic is divided by the property's conversion divisor; properties
/// missing from [`SOIL_CONVERSION_FACTORS`] pass through unscaled with a
/// warning.
///
/// Output columns, in fixed order: `layer`, `depth`, `stat`, then one
/// column per requested statistic in conventional units.
pub fn soil_properties(
    feature: &Feature,
    resource: Option<&RasterStack>,
    stats: &[Statistic],
    engine: Engine,
) -> Result<Option<Table>> {
    let Some(stack) = resource else {
        debug!("soil resource absent, returning no-data");
        return Ok(None);
    };

    // Parse every layer name before touching the raster, so a mislabeled
    // stack fails loudly instead of producing a half-labeled table.
    let metas: Vec<SoilLayerMeta> = stack
        .iter()
        .map(|layer| parse_soil_layer(layer.name()))
        .collect::<Result<_>>()?;

    let request = ZonalRequest::new(stats, engine);
    let output = select_engine(Aoi::Asset(feature), stack, &request)?;
    let ZonalOutput::Asset(mut table) = output else {
        unreachable!("asset AOI always yields asset output");
    };
    if table.nrows() != stack.len() {
        return Err(missing_rows_error("soil", table.nrows(), stack.len()));
    }

    table.push_column(
        "layer",
        metas.iter().map(|m| Value::from(m.property.clone())).collect(),
    )?;
    table.push_column(
        "depth",
        metas.iter().map(|m| Value::from(m.depth.clone())).collect(),
    )?;
    table.push_column(
        "stat",
        metas.iter().map(|m| Value::from(m.stat.clone())).collect(),
    )?;
    table.move_front(&["layer", "depth", "stat"])?;

    let divisors: Vec<f64> = metas
        .iter()
        .map(|m| match conversion_factor(&m.property) {
            Some(f) => f,
            None => {
                warn!(property = %m.property, "no conversion factor, leaving values unscaled");
                1.0
            }
        })
        .collect();

    for stat in stats {
        table.map_column(&stat_column(None, *stat), |row, value| {
            match value.as_f64() {
                Some(v) => Value::Float(v / divisors[row]),
                None => Value::Null,
            }
        })?;
    }

    Ok(Some(table))
}
