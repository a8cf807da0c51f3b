//! Colormap references for plot items
//!
//! Colormaps are declared here as control points or by name; building the
//! interpolation function from them is left to the rendering engine.

use serde::{Deserialize, Serialize};

/// A color in RGB format (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a color from RGB components
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One control point: a position on the normalized scale and its color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Colormap reference carried by a plot item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColormapSpec {
    /// A colormap the renderer knows by name (e.g. "PuBu")
    Named { name: String },
    /// Control points, sorted by position
    ControlPoints { stops: Vec<ColorStop> },
}

impl ColormapSpec {
    /// Named colormap
    pub fn named(name: impl Into<String>) -> Self {
        ColormapSpec::Named { name: name.into() }
    }

    /// Build from control points; stops are sorted by position
    pub fn from_stops(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        ColormapSpec::ControlPoints { stops }
    }

    /// Control points, if this is not a named colormap
    pub fn stops(&self) -> Option<&[ColorStop]> {
        match self {
            ColormapSpec::ControlPoints { stops } => Some(stops),
            ColormapSpec::Named { .. } => None,
        }
    }
}

// MARK: - Colormaps used by the surge figures

/// Diverging map: blue below zero, white at zero, red above
pub fn red_white_blue() -> ColormapSpec {
    ColormapSpec::from_stops(vec![
        ColorStop::new(0.0, Color::rgb(0.0, 0.0, 1.0)),
        ColorStop::new(0.5, Color::rgb(1.0, 1.0, 1.0)),
        ColorStop::new(1.0, Color::rgb(1.0, 0.0, 0.0)),
    ])
}

/// Surface elevation map (same diverging scheme as velocity)
pub fn surface() -> ColormapSpec {
    red_white_blue()
}

/// Current speed map
pub fn speed() -> ColormapSpec {
    ColormapSpec::named("PuBu")
}

/// Land colors for dry cells
pub fn land() -> ColormapSpec {
    ColormapSpec::from_stops(vec![
        ColorStop::new(0.0, Color::rgb(0.5, 0.7, 0.0)),
        ColorStop::new(1.0, Color::rgb(0.2, 0.5, 0.2)),
    ])
}

/// Bathymetry and topography: deep ocean, shallow shore, low land, high land
pub fn topography() -> ColormapSpec {
    ColormapSpec::from_stops(vec![
        ColorStop::new(-1.0, Color::rgb(0.3, 0.2, 0.1)),
        ColorStop::new(-0.00001, Color::rgb(0.95, 0.9, 0.7)),
        ColorStop::new(0.00001, Color::rgb(0.5, 0.7, 0.0)),
        ColorStop::new(1.0, Color::rgb(0.2, 0.5, 0.2)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_serializes_as_components() {
        let json = serde_json::to_string(&Color::rgb(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(json, r#"{"r":1.0,"g":0.5,"b":0.0}"#);
    }

    #[test]
    fn test_red_white_blue_is_diverging() {
        let spec = red_white_blue();
        let stops = spec.stops().unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].color, Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(stops[1].color, Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(stops[2].color, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_stops_sorts() {
        let spec = ColormapSpec::from_stops(vec![
            ColorStop::new(1.0, Color::rgb(1.0, 0.0, 0.0)),
            ColorStop::new(-1.0, Color::rgb(0.0, 0.0, 1.0)),
        ]);
        let stops = spec.stops().unwrap();
        assert_eq!(stops[0].position, -1.0);
    }

    #[test]
    fn test_topography_straddles_shoreline() {
        let spec = topography();
        let stops = spec.stops().unwrap();
        assert_eq!(stops.len(), 4);
        assert!(stops[1].position < 0.0 && stops[2].position > 0.0);
    }

    #[test]
    fn test_named_has_no_stops() {
        assert!(speed().stops().is_none());
    }
}
