//! # geozonal Core
//!
//! Core types for the geozonal zonal-statistics library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic raster grid type
//! - `RasterStack`: Ordered named layers sharing one grid geometry
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `Crs`: Coordinate Reference System metadata
//! - `Feature` / `FeatureCollection`: Polygon areas of interest
//! - `Table`: Columnar results returned by the indicator calculators

pub mod crs;
pub mod error;
pub mod raster;
pub mod table;
pub mod vector;

pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Layer, Raster, RasterElement, RasterStack};
pub use table::{Column, Table, Value};
pub use vector::{Feature, FeatureCollection};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Layer, Raster, RasterElement, RasterStack};
    pub use crate::table::{Column, Table, Value};
    pub use crate::vector::{Feature, FeatureCollection};
}
