//! Drought wetness indicator
//!
//! Zonal statistics of drought-wetness rasters over an AOI, one row per
//! monthly layer, with the acquisition date parsed from each layer name.

use geozonal_core::{RasterStack, Result, Table, Value};
use geozonal_engines::{select_engine, Aoi, Engine, Statistic, ZonalOutput, ZonalRequest};
use tracing::debug;

use crate::layer_meta::parse_layer_date;
use crate::missing_rows_error;

/// Compute drought-wetness statistics for an AOI.
///
/// Returns `Ok(None)` when the raster resource is absent for this AOI;
/// "resource unavailable" is a defined outcome, not an error. Otherwise
/// each result table carries the requested statistics plus a `date`
/// column parsed from the 8-digit token of each layer name; layers
/// without a parseable date get a null date.
///
/// In portfolio mode the date column is broadcast into every feature's
/// table; each table's row count is checked against the layer count
/// first, so misaligned engine output cannot silently shift dates.
pub fn drought_wetness(
    aoi: Aoi,
    resource: Option<&RasterStack>,
    stats: &[Statistic],
    engine: Engine,
) -> Result<Option<ZonalOutput>> {
    let Some(stack) = resource else {
        debug!(mode = aoi.mode().token(), "drought resource absent, returning no-data");
        return Ok(None);
    };

    let dates: Vec<Value> = stack
        .iter()
        .map(|layer| match parse_layer_date(layer.name()) {
            Some(date) => Value::Date(date),
            None => Value::Null,
        })
        .collect();

    let request = ZonalRequest::new(stats, engine);
    let output = match select_engine(aoi, stack, &request)? {
        ZonalOutput::Asset(table) => {
            ZonalOutput::Asset(attach_dates(table, &dates, stack.len())?)
        }
        ZonalOutput::Portfolio(tables) => ZonalOutput::Portfolio(
            tables
                .into_iter()
                .map(|t| attach_dates(t, &dates, stack.len()))
                .collect::<Result<Vec<_>>>()?,
        ),
    };
    Ok(Some(output))
}

fn attach_dates(mut table: Table, dates: &[Value], layers: usize) -> Result<Table> {
    if table.nrows() != layers {
        return Err(missing_rows_error("drought", table.nrows(), layers));
    }
    table.push_column("date", dates.to_vec())?;
    Ok(table)
}
