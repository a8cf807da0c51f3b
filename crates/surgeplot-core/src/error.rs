//! Error types for surgeplot-core
//!
//! Provides error handling for:
//! - Settings and report parameter validation
//! - Plot specification construction
//! - Field resolution against a frame
//! - Frame state shape checks

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for surgeplot operations
#[derive(Error, Debug)]
pub enum SurgePlotError {
    /// Settings or report parameter errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Plot specification errors
    #[error("Invalid plot specification: {0}")]
    Spec(#[from] PlotSpecError),

    /// Field resolution errors
    #[error("Field resolution failed: {0}")]
    Field(#[from] FieldError),

    /// Frame state errors
    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value must be strictly positive
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: String, value: f64 },

    /// Value must be finite
    #[error("{name} must be finite (got {value})")]
    NotFinite { name: String, value: f64 },

    /// Range is inverted or degenerate
    #[error("{name}: invalid range [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// Frame stride of zero
    #[error("Frame selection step must be positive")]
    ZeroStep,

    /// Layout density of zero
    #[error("{name} must be at least 1")]
    ZeroDensity { name: String },

    /// Overlay polygon with mismatched coordinates
    #[error("Overlay '{name}' has {x_len} x-values but {y_len} y-values")]
    OverlayMismatch {
        name: String,
        x_len: usize,
        y_len: usize,
    },

    /// Settings file has an unknown extension
    #[error("Unsupported settings format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a settings file
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while assembling the plot specification tree
#[derive(Error, Debug)]
pub enum PlotSpecError {
    /// Two figures share a number
    #[error("Figure number {number} is used by both '{first}' and '{second}'")]
    DuplicateFigureNumber {
        number: u32,
        first: String,
        second: String,
    },

    /// Figure has no axes
    #[error("Figure '{name}' has no axes")]
    EmptyFigure { name: String },

    /// Display range on an item is not finite or inverted
    #[error("Item '{item}' in axes '{axes}': {reason}")]
    InvalidDisplayRange {
        axes: String,
        item: String,
        reason: String,
    },

    /// Settings rejected while building
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised when a plot item's selector cannot be resolved for a frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Raw index outside the frame's variables
    #[error("Field index {index} not present (frame has {available} variables)")]
    MissingIndex { index: usize, available: usize },

    /// Slice column outside the grid
    #[error("Slice index {index} outside grid with {columns} columns")]
    SliceOutOfBounds { index: usize, columns: usize },

    /// Derived field needs the dry tolerance but the context has none
    #[error("Derived field '{field}' requires '{key}' in the frame context")]
    MissingContext { field: String, key: String },

    /// Selector kind does not fit the item's rendering kind
    #[error("Item kind {kind} cannot render {selector}")]
    KindMismatch { kind: String, selector: String },
}

/// Errors raised when constructing frame state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Coordinate arrays do not match the data grid
    #[error("Coordinate '{axis}' has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        axis: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Frame carries no variables at all
    #[error("Frame has {available} variables, at least {required} required")]
    TooFewVariables { available: usize, required: usize },

    /// Coordinates do not strictly increase along their grid axis
    #[error("Coordinate '{axis}' does not increase at grid index {index}")]
    NonIncreasing { axis: String, index: usize },

    /// Gauge series time axis does not match samples
    #[error("Gauge series has {times} times but {samples} samples")]
    SeriesLength { times: usize, samples: usize },
}

/// Result type alias for surgeplot operations
pub type SurgePlotResult<T> = Result<T, SurgePlotError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for specification construction
pub type SpecResult<T> = Result<T, PlotSpecError>;

/// Result type alias for field resolution
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type alias for frame construction
pub type FrameResult<T> = Result<T, FrameError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate a strictly positive, finite value
    pub fn validate_positive(name: &str, value: f64) -> ConfigResult<()> {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite {
                name: name.to_string(),
                value,
            });
        }
        if value <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: name.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Validate a finite range with min <= max
    pub fn validate_range(name: &str, min: f64, max: f64) -> ConfigResult<()> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(())
    }

    /// Validate a layout density (count per line)
    pub fn validate_density(name: &str, value: u32) -> ConfigResult<()> {
        if value == 0 {
            return Err(ConfigError::ZeroDensity {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
