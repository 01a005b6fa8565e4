//! Travel-time accessibility indicator
//!
//! Zonal statistics of travel-time rasters over an AOI, one layer per
//! city-size distance band. The upstream rasters encode "no data" as
//! values at or above 65535; those cells are removed before any
//! statistic is computed.

use geozonal_core::{Feature, RasterStack, Result, Table, Value};
use geozonal_engines::{select_engine, Aoi, Engine, Statistic, ZonalOutput, ZonalRequest};
use tracing::debug;

use crate::layer_meta::parse_distance_band;
use crate::missing_rows_error;

/// Cell values at or above this are "no data" in travel-time rasters
pub const TRAVELTIME_NODATA: f64 = 65535.0;

/// Compute travel-time statistics for one AOI (asset mode).
///
/// Returns `Ok(None)` when the raster resource is absent. Sentinel cells
/// (>= 65535) are cleared to NaN on a local copy of the stack, never on
/// the caller's rasters, so they cannot influence any statistic.
/// Each layer's distance band (`*-<band>.tif`) is attached as
/// a `distance` column, order-aligned with the output rows; a name
/// without a band token is a hard error.
pub fn travel_time(
    feature: &Feature,
    resource: Option<&RasterStack>,
    stats: &[Statistic],
    engine: Engine,
) -> Result<Option<Table>> {
    let Some(stack) = resource else {
        debug!("travel-time resource absent, returning no-data");
        return Ok(None);
    };

    let bands: Vec<Value> = stack
        .iter()
        .map(|layer| parse_distance_band(layer.name()).map(Value::Str))
        .collect::<Result<_>>()?;

    let sanitized = stack.map_values(|v| if v >= TRAVELTIME_NODATA { f64::NAN } else { v });

    let request = ZonalRequest::new(stats, engine);
    let output = select_engine(Aoi::Asset(feature), &sanitized, &request)?;
    let ZonalOutput::Asset(mut table) = output else {
        unreachable!("asset AOI always yields asset output");
    };
    if table.nrows() != stack.len() {
        return Err(missing_rows_error("travel time", table.nrows(), stack.len()));
    }

    table.push_column("distance", bands)?;
    Ok(Some(table))
}
