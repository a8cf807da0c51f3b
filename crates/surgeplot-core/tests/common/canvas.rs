//! A canvas that records every call it receives

use ndarray::{ArrayView1, ArrayView2};
use surgeplot_core::{AxesCanvas, AxisGroup, Figure, Gauge, LineStyle, PlotItem};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    BeginAxes { figure: u32, axes: String },
    Title(String),
    XLabel(String),
    YLabel(String),
    Grid(bool),
    Line { x: Vec<f64>, y: Vec<f64>, style: String },
    Gauges { count: usize, style: String, labels: bool },
    ColorGrid { item: String, shape: (usize, usize), values: Vec<f64> },
    ItemLine { item: String, x: Vec<f64>, values: Vec<f64> },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn titles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Title(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn color_grids(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::ColorGrid { item, .. } => Some(item.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn item_lines(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::ItemLine { .. }))
            .collect()
    }

    pub fn overlay_lines(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .collect()
    }
}

impl AxesCanvas for RecordingCanvas {
    fn begin_axes(&mut self, figure: &Figure, axes: &AxisGroup) {
        self.calls.push(DrawCall::BeginAxes {
            figure: figure.number,
            axes: axes.title.clone(),
        });
    }

    fn set_title(&mut self, title: &str) {
        self.calls.push(DrawCall::Title(title.to_string()));
    }

    fn set_xlabel(&mut self, label: &str) {
        self.calls.push(DrawCall::XLabel(label.to_string()));
    }

    fn set_ylabel(&mut self, label: &str) {
        self.calls.push(DrawCall::YLabel(label.to_string()));
    }

    fn grid(&mut self, on: bool) {
        self.calls.push(DrawCall::Grid(on));
    }

    fn plot_line(&mut self, x: &[f64], y: &[f64], style: LineStyle) {
        self.calls.push(DrawCall::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.to_shorthand(),
        });
    }

    fn plot_gauges(&mut self, gauges: &[Gauge], style: LineStyle, add_labels: bool) {
        self.calls.push(DrawCall::Gauges {
            count: gauges.len(),
            style: style.to_shorthand(),
            labels: add_labels,
        });
    }

    fn color_grid(
        &mut self,
        item: &PlotItem,
        _x: ArrayView2<'_, f64>,
        _y: ArrayView2<'_, f64>,
        values: ArrayView2<'_, f64>,
    ) {
        self.calls.push(DrawCall::ColorGrid {
            item: item.name.clone(),
            shape: values.dim(),
            values: values.iter().copied().collect(),
        });
    }

    fn line(&mut self, item: &PlotItem, x: ArrayView1<'_, f64>, values: ArrayView1<'_, f64>) {
        self.calls.push(DrawCall::ItemLine {
            item: item.name.clone(),
            x: x.to_vec(),
            values: values.to_vec(),
        });
    }
}
