//! Vector data: area-of-interest features

use geo_types::Geometry;

/// A polygon area of interest with an optional identifier.
///
/// One feature corresponds to one row of an asset portfolio. The geometry
/// is owned by the caller's collection and never mutated by the indicator
/// calculators.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature geometry (polygon or multi-polygon for AOIs)
    geometry: Geometry<f64>,
    /// Optional feature ID
    id: Option<String>,
}

impl Feature {
    /// Create a new feature
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self { geometry, id: None }
    }

    /// Create a new feature with an identifier
    pub fn with_id(geometry: Geometry<f64>, id: impl Into<String>) -> Self {
        Self {
            geometry,
            id: Some(id.into()),
        }
    }

    /// The feature geometry
    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// The feature identifier, if set
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Ordered collection of features (an asset portfolio).
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}
