//! Settings that parameterize the surge figures
//!
//! Every constant the figures depend on lives here so a run can override
//! them from a TOML or JSON file instead of editing code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::{Bounds, FigureSize};
use crate::error::{validation, ConfigError, ConfigResult};
use crate::frame::Overlay;

/// Plot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Depth (m) below which a cell is drawn as land
    pub dry_tolerance: f64,

    /// Half-width of the surface elevation display range
    pub surface_range: f64,

    /// Largest expected current speed; velocity ranges are `[-speed_max, speed_max]`
    pub speed_max: f64,

    /// Factor applied to `speed_max` for momentum ranges
    pub momentum_scale: f64,

    /// Grid column used for the cross-section figures
    pub slice_index: usize,

    /// Display range of the topography figure
    pub topography_range: (f64, f64),

    /// Display range of the land layer
    pub land_range: (f64, f64),

    /// Size of the two-panel component figures
    pub component_figure_size: FigureSize,

    /// Static geometry drawn over every domain plot
    pub overlays: Vec<Overlay>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            dry_tolerance: 1e-2,
            surface_range: 1e-2,
            speed_max: 1e-2,
            momentum_scale: 100.0,
            slice_index: 3,
            topography_range: (-100.0, 0.0),
            land_range: (0.0, 50.0),
            component_figure_size: FigureSize::new(16.0, 6.0),
            overlays: vec![Overlay::new(
                "island",
                vec![-52e3, -52e3, 52e3, 52e3, -52e3],
                vec![-102e3, 102e3, 102e3, -102e3, -102e3],
            )],
        }
    }
}

impl PlotSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric surface elevation range
    pub fn surface_bounds(&self) -> Bounds {
        Bounds::symmetric(self.surface_range)
    }

    /// Range of the speed colormap
    pub fn speed_bounds(&self) -> Bounds {
        Bounds::explicit(0.0, self.speed_max)
    }

    /// Symmetric diverging range for velocity components
    pub fn velocity_bounds(&self) -> Bounds {
        Bounds::symmetric(self.speed_max)
    }

    /// Symmetric diverging range for momentum components
    pub fn momentum_bounds(&self) -> Bounds {
        Bounds::symmetric(self.speed_max * self.momentum_scale)
    }

    /// Load settings from a TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a `.toml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate_positive("dry_tolerance", self.dry_tolerance)?;
        validation::validate_positive("surface_range", self.surface_range)?;
        validation::validate_positive("speed_max", self.speed_max)?;
        validation::validate_positive("momentum_scale", self.momentum_scale)?;
        validation::validate_range(
            "topography_range",
            self.topography_range.0,
            self.topography_range.1,
        )?;
        validation::validate_range("land_range", self.land_range.0, self.land_range.1)?;
        let size = self.component_figure_size;
        validation::validate_positive("component_figure_size.width", size.width)?;
        validation::validate_positive("component_figure_size.height", size.height)?;

        for overlay in &self.overlays {
            overlay.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = PlotSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.slice_index, 3);
        assert_eq!(settings.overlays.len(), 1);
        assert!(settings.overlays[0].is_closed());
    }

    #[test]
    fn test_derived_bounds() {
        let settings = PlotSettings::default();
        assert_eq!(settings.velocity_bounds(), Bounds::explicit(-0.01, 0.01));
        assert_eq!(settings.momentum_bounds(), Bounds::explicit(-1.0, 1.0));
        assert_eq!(settings.speed_bounds(), Bounds::explicit(0.0, 0.01));
        assert_eq!(settings.surface_bounds(), Bounds::explicit(-0.01, 0.01));
    }

    #[test]
    fn test_toml_partial_override() {
        let settings = PlotSettings::from_toml("speed_max = 0.5\nslice_index = 7\n").unwrap();
        assert_eq!(settings.speed_max, 0.5);
        assert_eq!(settings.slice_index, 7);
        assert_eq!(settings.dry_tolerance, 1e-2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = PlotSettings::default();
        let text = settings.to_toml().unwrap();
        assert_eq!(PlotSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let err = PlotSettings::from_json(r#"{"dry_tolerance": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { .. }));
    }

    #[test]
    fn test_validate_rejects_inverted_topography() {
        let settings = PlotSettings {
            topography_range: (0.0, -100.0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
