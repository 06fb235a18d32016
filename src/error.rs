//! Error types for map generation and dataset output

use thiserror::Error;

/// Errors raised while building or querying a map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Invalid dimensions {width}x{height}: width and height must be greater than 0")]
    InvalidDimension { width: usize, height: usize },

    #[error("Invalid {name}: {value} is outside 0..=100")]
    InvalidPercentage { name: &'static str, value: u32 },

    #[error("Array shape {rows}x{cols} does not match map {height}x{width}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        width: usize,
        height: usize,
    },

    #[error("Obstacle count {actual} does not match {expected} expected for {obstacles_perc}%")]
    DensityMismatch {
        expected: usize,
        actual: usize,
        obstacles_perc: u32,
    },

    #[error("Invalid cell value {value} at row {row}, col {col}: expected 0 or 1")]
    InvalidCellValue { row: usize, col: usize, value: u8 },

    #[error("Node {0} does not exist or is not crossable")]
    InvalidNode(usize),

    #[error("Need {required} crossable cells but only {available} are available")]
    NotEnoughCrossable { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Errors raised while loading the dataset configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while writing a dataset to disk
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
