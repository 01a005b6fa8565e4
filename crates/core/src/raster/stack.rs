//! Ordered stacks of named raster layers
//!
//! Indicator resources arrive as one raster layer per date, year or
//! measurement band. Layer names carry that metadata; the indicator
//! calculators parse it back out of the names downstream.

use crate::error::{Error, Result};
use crate::raster::Raster;

/// One named layer of a stack
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    grid: Raster<f64>,
}

impl Layer {
    /// Create a named layer
    pub fn new(name: impl Into<String>, grid: Raster<f64>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// Layer name as tagged by the upstream data source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layer's grid
    pub fn grid(&self) -> &Raster<f64> {
        &self.grid
    }
}

/// An ordered sequence of raster layers sharing one grid geometry.
///
/// All layers must have the same shape and geotransform; `push` rejects
/// layers that do not align. Layer order is preserved and determines the
/// row order of the result tables built from the stack.
#[derive(Debug, Clone, Default)]
pub struct RasterStack {
    layers: Vec<Layer>,
}

impl RasterStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Build a stack from (name, grid) pairs
    pub fn from_layers(
        layers: impl IntoIterator<Item = (String, Raster<f64>)>,
    ) -> Result<Self> {
        let mut stack = Self::new();
        for (name, grid) in layers {
            stack.push(name, grid)?;
        }
        Ok(stack)
    }

    /// Append a layer, validating that it aligns with the stack grid
    pub fn push(&mut self, name: impl Into<String>, grid: Raster<f64>) -> Result<()> {
        let name = name.into();
        if let Some(first) = self.layers.first() {
            let aligned = first.grid.shape() == grid.shape()
                && first.grid.transform() == grid.transform();
            if !aligned {
                return Err(Error::LayerMismatch { layer: name });
            }
        }
        self.layers.push(Layer::new(name, grid));
        Ok(())
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer at position `index`
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Iterate layers in order
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Layer names in order
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// Grid of the first layer, or an error for an empty stack.
    ///
    /// All layers share this geometry, so it stands in for the stack grid.
    pub fn grid(&self) -> Result<&Raster<f64>> {
        self.layers
            .first()
            .map(|l| &l.grid)
            .ok_or(Error::EmptyStack)
    }

    /// Return a copy with every layer's cells rewritten through `f`.
    ///
    /// Used for sentinel normalization; the original stack is untouched.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> RasterStack {
        RasterStack {
            layers: self
                .layers
                .iter()
                .map(|l| Layer::new(l.name.clone(), l.grid.map_values(&f)))
                .collect(),
        }
    }
}
