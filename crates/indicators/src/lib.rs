//! # geozonal Indicators
//!
//! Environmental indicator calculators over polygon areas of interest.
//!
//! Each indicator takes an AOI and a pre-fetched raster stack, delegates
//! the zonal aggregation to the engine dispatcher, and reshapes the
//! result into a table with metadata parsed from the raster layer names:
//!
//! - **drought**: Wetness statistics per dated layer
//! - **landcover**: Class areas and shares per yearly layer
//! - **soil**: Soil-property statistics in conventional units
//! - **traveltime**: Accessibility statistics per distance band
//!
//! An absent raster resource is a defined "no data" outcome (`Ok(None)`)
//! for every indicator, never an error.

pub mod drought;
pub mod landcover;
pub mod layer_meta;
pub mod soil;
pub mod traveltime;

pub use drought::drought_wetness;
pub use landcover::{class_name, landcover_class_area, LANDCOVER_CLASSES};
pub use layer_meta::{
    parse_distance_band, parse_layer_date, parse_layer_year, parse_soil_layer, SoilLayerMeta,
};
pub use soil::{conversion_factor, soil_properties, SOIL_CONVERSION_FACTORS};
pub use traveltime::{travel_time, TRAVELTIME_NODATA};

use geozonal_core::Error;

/// Error for engine output whose row count does not match the stack,
/// which would silently misalign layer metadata
pub(crate) fn missing_rows_error(context: &str, rows: usize, expected: usize) -> Error {
    Error::MisalignedOutput {
        context: context.to_string(),
        rows,
        expected,
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::drought::drought_wetness;
    pub use crate::landcover::landcover_class_area;
    pub use crate::soil::soil_properties;
    pub use crate::traveltime::travel_time;
    pub use geozonal_engines::prelude::*;
}
