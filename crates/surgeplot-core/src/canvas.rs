//! Drawing surface contract
//!
//! The rendering engine implements `AxesCanvas` for the axes it is currently
//! drawing. Hooks and the frame walk only ever issue calls through it, so a
//! canvas must be local to the worker drawing the frame.

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::metadata::Gauge;
use crate::spec::{AxisGroup, Figure, PlotItem};

/// Line pattern of a style string
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
    /// Markers only
    None,
}

/// Compact line style in the `k-o` / `b-` / `k--` / `ko` shorthand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Single-letter color code
    pub color: Option<char>,
    pub pattern: LinePattern,
    /// Marker glyph (`o`, `x`, `+`, `.`, `s`, `^`)
    pub marker: Option<char>,
}

impl LineStyle {
    /// Parse a shorthand style string; unknown characters are ignored
    pub fn parse(style: &str) -> Self {
        let mut color = None;
        let mut marker = None;
        let mut pattern = None;

        let mut chars = style.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '-' => match chars.peek() {
                    Some('-') => {
                        chars.next();
                        pattern = Some(LinePattern::Dashed);
                    }
                    Some('.') => {
                        chars.next();
                        pattern = Some(LinePattern::DashDot);
                    }
                    _ => pattern = Some(LinePattern::Solid),
                },
                ':' => pattern = Some(LinePattern::Dotted),
                'o' | 'x' | '+' | '.' | 's' | '^' => marker = Some(c),
                'k' | 'w' | 'r' | 'g' | 'b' | 'c' | 'm' | 'y' => color = Some(c),
                _ => {}
            }
        }

        // A marker without a line pattern draws markers only
        let pattern = match (pattern, marker) {
            (Some(p), _) => p,
            (None, Some(_)) => LinePattern::None,
            (None, None) => LinePattern::Solid,
        };

        Self {
            color,
            pattern,
            marker,
        }
    }

    /// Format back to the shorthand
    pub fn to_shorthand(&self) -> String {
        let mut out = String::new();
        if let Some(c) = self.color {
            out.push(c);
        }
        out.push_str(match self.pattern {
            LinePattern::Solid => "-",
            LinePattern::Dashed => "--",
            LinePattern::DashDot => "-.",
            LinePattern::Dotted => ":",
            LinePattern::None => "",
        });
        if let Some(m) = self.marker {
            out.push(m);
        }
        out
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::parse("b-")
    }
}

/// The axes currently being drawn
pub trait AxesCanvas {
    /// Called before anything is drawn into a new axis-group
    fn begin_axes(&mut self, _figure: &Figure, _axes: &AxisGroup) {}

    fn set_title(&mut self, title: &str);

    fn set_xlabel(&mut self, label: &str);

    fn set_ylabel(&mut self, label: &str);

    fn grid(&mut self, on: bool);

    /// Polyline in data coordinates
    fn plot_line(&mut self, x: &[f64], y: &[f64], style: LineStyle);

    /// Gauge location markers, optionally labelled
    fn plot_gauges(&mut self, gauges: &[Gauge], style: LineStyle, add_labels: bool);

    /// Filled color grid for one plot item
    fn color_grid(
        &mut self,
        item: &PlotItem,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        values: ArrayView2<'_, f64>,
    );

    /// Line for one plot item (slices and gauge series)
    fn line(&mut self, item: &PlotItem, x: ArrayView1<'_, f64>, values: ArrayView1<'_, f64>);
}
