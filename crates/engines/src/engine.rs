//! Engine and processing-mode selectors
//!
//! The statistics backends form a closed set. They differ in how polygon
//! coverage of cells is derived but are interchangeable at the dispatcher
//! interface: same inputs, same output shape.

use geo_types::Geometry;
use geozonal_core::{Error, Raster, RasterElement, Result};

use crate::coverage::{center_coverage, fraction_coverage, rasterize_mask, CoveredCell};

/// Available zonal-statistics backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Rasterize the polygon into a zone mask, then aggregate by scanning
    /// the grid against it (pixel-center precision)
    Zonal,
    /// Walk the polygon's bounding window and keep cells whose center
    /// falls inside (pixel-center precision)
    Extract,
    /// Weight each cell by its exact covered area fraction
    ExactExtract,
}

impl Engine {
    /// Accepted tokens, for error messages
    pub const TOKENS: &'static str = "zonal, extract, exactextract";

    /// The engine's string token
    pub fn token(&self) -> &'static str {
        match self {
            Engine::Zonal => "zonal",
            Engine::Extract => "extract",
            Engine::ExactExtract => "exactextract",
        }
    }

    /// Parse an engine token, failing fast on anything unrecognized
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "zonal" => Ok(Engine::Zonal),
            "extract" => Ok(Engine::Extract),
            "exactextract" => Ok(Engine::ExactExtract),
            _ => Err(Error::UnknownEngine {
                token: token.to_string(),
                expected: Self::TOKENS,
            }),
        }
    }

    /// Derive the covered cells of `grid` for the given AOI geometry
    pub fn coverage<T: RasterElement>(
        &self,
        geom: &Geometry<f64>,
        grid: &Raster<T>,
    ) -> Vec<CoveredCell> {
        match self {
            Engine::Zonal => {
                // Aggregate through an explicit zone mask, the way a
                // zone-raster backend does it.
                let mask = rasterize_mask(geom, grid);
                let (rows, cols) = mask.shape();
                let mut cells = Vec::new();
                for row in 0..rows {
                    for col in 0..cols {
                        if unsafe { mask.get_unchecked(row, col) } == 1 {
                            cells.push(CoveredCell {
                                row,
                                col,
                                weight: 1.0,
                            });
                        }
                    }
                }
                cells
            }
            Engine::Extract => center_coverage(geom, grid),
            Engine::ExactExtract => fraction_coverage(geom, grid),
        }
    }
}

/// How many polygons one call processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Many polygons against one raster stack in a single call
    Portfolio,
    /// A single polygon
    Asset,
}

impl ProcessingMode {
    /// Accepted tokens, for error messages
    pub const TOKENS: &'static str = "portfolio, asset";

    /// The mode's string token
    pub fn token(&self) -> &'static str {
        match self {
            ProcessingMode::Portfolio => "portfolio",
            ProcessingMode::Asset => "asset",
        }
    }

    /// Parse a mode token, failing fast on anything unrecognized
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "portfolio" => Ok(ProcessingMode::Portfolio),
            "asset" => Ok(ProcessingMode::Asset),
            _ => Err(Error::UnknownMode {
                token: token.to_string(),
                expected: Self::TOKENS,
            }),
        }
    }
}
