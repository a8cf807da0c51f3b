//! Axis extents and subplot layout
//!
//! Extents are either pinned to explicit numbers or left to the renderer,
//! which then scales to the drawn data.

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigResult};

/// Extent of one axis or the display range of one plot item
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bounds {
    /// Fixed interval
    Explicit { min: f64, max: f64 },
    /// Defer to the rendered data
    #[default]
    Automatic,
}

impl Bounds {
    /// Create explicit bounds
    pub fn explicit(min: f64, max: f64) -> Self {
        Bounds::Explicit { min, max }
    }

    /// Symmetric interval `[-extent, extent]`
    pub fn symmetric(extent: f64) -> Self {
        Bounds::Explicit {
            min: -extent,
            max: extent,
        }
    }

    /// Check for the automatic variant
    pub fn is_automatic(&self) -> bool {
        matches!(self, Bounds::Automatic)
    }

    /// The interval as a pair, if explicit
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match *self {
            Bounds::Explicit { min, max } => Some((min, max)),
            Bounds::Automatic => None,
        }
    }

    /// Check that explicit bounds are finite and ordered
    pub fn validate(&self, name: &str) -> ConfigResult<()> {
        match *self {
            Bounds::Explicit { min, max } => validation::validate_range(name, min, max),
            Bounds::Automatic => Ok(()),
        }
    }
}

/// Placement of an axis-group inside its figure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxesLayout {
    /// Fill the whole figure
    #[default]
    Full,
    /// Grid cell, 1-based index in row-major order
    Subplot { rows: u32, cols: u32, index: u32 },
}

impl AxesLayout {
    /// Grid cell helper
    pub fn subplot(rows: u32, cols: u32, index: u32) -> Self {
        AxesLayout::Subplot { rows, cols, index }
    }

    /// Axes command in the `subplot(121)` shorthand
    pub fn command(&self) -> String {
        match self {
            AxesLayout::Full => "subplot(111)".to_string(),
            AxesLayout::Subplot { rows, cols, index }
                if *rows < 10 && *cols < 10 && *index < 10 =>
            {
                format!("subplot({}{}{})", rows, cols, index)
            }
            AxesLayout::Subplot { rows, cols, index } => {
                format!("subplot({},{},{})", rows, cols, index)
            }
        }
    }
}

/// Physical figure size in inches
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
