//! Engine dispatch
//!
//! The single entry point the indicator calculators go through: given an
//! AOI, a raster stack and a request, pick the engine, compute one table
//! per polygon (one row per layer, one column per statistic) and return
//! it in the shape the processing mode demands.

use geo_types::Geometry;
use geozonal_core::{Feature, FeatureCollection, RasterStack, Result, Table};
use tracing::debug;

use crate::engine::{Engine, ProcessingMode};
use crate::statistic::{Sample, Statistic};

/// What to compute: statistics, backend, optional column-name prefix
#[derive(Debug, Clone)]
pub struct ZonalRequest<'a> {
    pub stats: &'a [Statistic],
    pub engine: Engine,
    pub prefix: Option<&'a str>,
}

impl<'a> ZonalRequest<'a> {
    pub fn new(stats: &'a [Statistic], engine: Engine) -> Self {
        Self {
            stats,
            engine,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

/// The AOI an indicator call operates on. Tying the processing mode to
/// the input shape keeps the two from disagreeing.
#[derive(Debug, Clone, Copy)]
pub enum Aoi<'a> {
    /// A single polygon
    Asset(&'a Feature),
    /// A whole portfolio, processed against the stack in one call
    Portfolio(&'a FeatureCollection),
}

impl Aoi<'_> {
    pub fn mode(&self) -> ProcessingMode {
        match self {
            Aoi::Asset(_) => ProcessingMode::Asset,
            Aoi::Portfolio(_) => ProcessingMode::Portfolio,
        }
    }
}

/// Dispatcher output: one table per asset, or one per portfolio feature
#[derive(Debug, Clone)]
pub enum ZonalOutput {
    Asset(Table),
    Portfolio(Vec<Table>),
}

impl ZonalOutput {
    /// The asset table, if this is asset output
    pub fn into_asset(self) -> Option<Table> {
        match self {
            ZonalOutput::Asset(t) => Some(t),
            ZonalOutput::Portfolio(_) => None,
        }
    }
}

/// Column name for one statistic, honoring the request prefix
pub fn stat_column(prefix: Option<&str>, stat: Statistic) -> String {
    match prefix {
        Some(p) => format!("{p}_{}", stat.token()),
        None => stat.token().to_string(),
    }
}

/// Compute the statistics table for one polygon: one row per stack layer,
/// one column per requested statistic
pub fn asset_table(
    geom: &Geometry<f64>,
    stack: &RasterStack,
    request: &ZonalRequest,
) -> Result<Table> {
    let grid = stack.grid()?;
    let coverage = request.engine.coverage(geom, grid);

    // Collect the weighted samples once per layer, then evaluate every
    // requested statistic over them.
    let mut per_layer: Vec<Vec<Sample>> = Vec::with_capacity(stack.len());
    for layer in stack.iter() {
        let grid = layer.grid();
        let samples: Vec<Sample> = coverage
            .iter()
            .filter_map(|cell| {
                let v = unsafe { grid.get_unchecked(cell.row, cell.col) };
                (!grid.is_nodata(v)).then_some((v, cell.weight))
            })
            .collect();
        per_layer.push(samples);
    }

    let mut table = Table::new();
    for stat in request.stats {
        let values: Vec<f64> = per_layer.iter().map(|s| stat.compute(s)).collect();
        table.push_floats(stat_column(request.prefix, *stat), values)?;
    }
    Ok(table)
}

/// Dispatch a zonal-statistics request.
///
/// Asset AOIs yield one table; portfolio AOIs yield one table per
/// feature, in feature order. Every table has one row per stack layer.
pub fn select_engine(aoi: Aoi, stack: &RasterStack, request: &ZonalRequest) -> Result<ZonalOutput> {
    debug!(
        engine = request.engine.token(),
        mode = aoi.mode().token(),
        layers = stack.len(),
        "dispatching zonal request"
    );

    match aoi {
        Aoi::Asset(feature) => {
            let table = asset_table(feature.geometry(), stack, request)?;
            Ok(ZonalOutput::Asset(table))
        }
        Aoi::Portfolio(collection) => {
            let tables = collection
                .iter()
                .map(|feature| asset_table(feature.geometry(), stack, request))
                .collect::<Result<Vec<_>>>()?;
            Ok(ZonalOutput::Portfolio(tables))
        }
    }
}
