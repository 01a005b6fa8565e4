//! Coordinate Reference System handling

use serde::{Deserialize, Serialize};

/// Geographic EPSG codes the engines recognize as angular (degree) grids.
const GEOGRAPHIC_EPSG: [u32; 3] = [4326, 4269, 4267];

/// Coordinate Reference System representation.
///
/// Projection handling is out of scope for this crate; the CRS is carried
/// as metadata, and the one question the engines ask is whether the grid
/// coordinates are angular (geographic) or planar (projected), which
/// decides how per-cell areas are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    /// EPSG code if known
    epsg: Option<u32>,
    /// WKT representation if available
    wkt: Option<String>,
}

impl Crs {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            wkt: None,
        }
    }

    /// Create a CRS from a WKT string
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            epsg: None,
            wkt: Some(wkt.into()),
        }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Get WKT representation
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Whether coordinates are angular degrees rather than planar units.
    ///
    /// Unknown CRS definitions are treated as projected; callers that know
    /// better should tag their rasters with an explicit EPSG code.
    pub fn is_geographic(&self) -> bool {
        match self.epsg {
            Some(code) => GEOGRAPHIC_EPSG.contains(&code),
            None => self
                .wkt
                .as_deref()
                .is_some_and(|w| w.trim_start().starts_with("GEOGCS")),
        }
    }

    /// Check if two CRS are equivalent
    pub fn is_equivalent(&self, other: &Crs) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.wkt, &other.wkt) {
            return a == b;
        }
        false
    }
}
