//! # geozonal Engines
//!
//! Zonal-statistics machinery for geozonal.
//!
//! - **statistic**: The closed set of summary statistics, weight-aware
//! - **coverage**: Polygon coverage of raster cells (pixel-center and
//!   exact area-weighted)
//! - **engine**: The interchangeable backends and processing modes
//! - **dispatch**: `select_engine`, the entry point the indicator
//!   calculators use
//! - **mask** / **cellarea**: Polygon masking and per-cell ground areas

pub mod cellarea;
pub mod coverage;
pub mod dispatch;
pub mod engine;
pub mod mask;
pub mod statistic;

pub use cellarea::{cell_area_ha, cell_area_m2};
pub use coverage::{center_coverage, fraction_coverage, rasterize_mask, CoveredCell};
pub use dispatch::{asset_table, select_engine, stat_column, Aoi, ZonalOutput, ZonalRequest};
pub use engine::{Engine, ProcessingMode};
pub use mask::{apply_mask, mask_to_polygon};
pub use statistic::{parse_statistics, Statistic};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dispatch::{select_engine, Aoi, ZonalOutput, ZonalRequest};
    pub use crate::engine::{Engine, ProcessingMode};
    pub use crate::statistic::{parse_statistics, Statistic};
    pub use geozonal_core::prelude::*;
}
