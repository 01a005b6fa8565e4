//! Error types for geozonal

use thiserror::Error;

/// Main error type for geozonal operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Layer '{layer}' does not align with the stack grid")]
    LayerMismatch { layer: String },

    #[error("Raster stack is empty")]
    EmptyStack,

    #[error("Unknown statistic '{token}' (expected one of: {expected})")]
    UnknownStatistic { token: String, expected: &'static str },

    #[error("Unknown engine '{token}' (expected one of: {expected})")]
    UnknownEngine { token: String, expected: &'static str },

    #[error("Unknown processing mode '{token}' (expected one of: {expected})")]
    UnknownMode { token: String, expected: &'static str },

    #[error("Malformed layer name '{name}': {reason}")]
    MalformedLayerName { name: String, reason: String },

    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    #[error("Column '{name}' has {got} rows, table has {expected}")]
    ColumnLength {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("Engine output for '{context}' has {rows} rows, expected {expected}")]
    MisalignedOutput {
        context: String,
        rows: usize,
        expected: usize,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for geozonal operations
pub type Result<T> = std::result::Result<T, Error>;
