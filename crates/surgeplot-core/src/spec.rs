//! The plot specification tree
//!
//! Figures contain axis-groups, axis-groups contain plot items. The tree is
//! assembled once by [`PlotTreeBuilder`], validated, and read-only after.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::axis::{AxesLayout, Bounds, FigureSize};
use crate::canvas::LineStyle;
use crate::colormap::ColormapSpec;
use crate::error::{PlotSpecError, SpecResult};
use crate::fields::{FieldSelector, SliceSpec};
use crate::hooks::{AxesDecoration, FrameSetup, TimeAnnotation};

/// Figures without an explicit number are numbered upward from here
pub const AUTO_FIGURE_BASE: u32 = 1000;

/// How a plot item is drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotKind {
    /// Filled color grid over the 2D domain
    ColorGrid,
    /// Single 1D line (gauge time series)
    Line,
    /// 2D field reduced to a cross-section line
    Slice { slice: SliceSpec },
}

impl PlotKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::ColorGrid => "color_grid",
            PlotKind::Line => "line",
            PlotKind::Slice { .. } => "slice",
        }
    }
}

/// One drawable layer in an axis-group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotItem {
    pub name: String,
    pub kind: PlotKind,
    pub selector: FieldSelector,

    /// Value range mapped onto the colormap
    pub display: Bounds,

    pub colormap: Option<ColormapSpec>,
    pub style: Option<LineStyle>,

    pub add_colorbar: bool,
    pub colorbar_label: Option<String>,

    /// Cell edges drawn per refinement level
    pub cell_edges: Vec<bool>,
    /// Patch outlines drawn per refinement level
    pub patch_edges: Vec<bool>,

    pub show: bool,
}

impl PlotItem {
    fn new(name: impl Into<String>, kind: PlotKind, selector: FieldSelector) -> Self {
        Self {
            name: name.into(),
            kind,
            selector,
            display: Bounds::Automatic,
            colormap: None,
            style: None,
            add_colorbar: false,
            colorbar_label: None,
            cell_edges: Vec::new(),
            patch_edges: Vec::new(),
            show: true,
        }
    }

    /// Filled color grid of a field
    pub fn color_grid(name: impl Into<String>, selector: impl Into<FieldSelector>) -> Self {
        Self::new(name, PlotKind::ColorGrid, selector.into())
    }

    /// Line plot of a time series
    pub fn line(name: impl Into<String>, selector: impl Into<FieldSelector>, style: &str) -> Self {
        Self::new(name, PlotKind::Line, selector.into()).with_style(style)
    }

    /// Cross-section line; the selector records the sliced variable
    pub fn slice(
        name: impl Into<String>,
        slice: SliceSpec,
        selector: impl Into<FieldSelector>,
        style: &str,
    ) -> Self {
        Self::new(name, PlotKind::Slice { slice }, selector.into()).with_style(style)
    }

    pub fn with_display(mut self, display: Bounds) -> Self {
        self.display = display;
        self
    }

    pub fn with_colormap(mut self, colormap: ColormapSpec) -> Self {
        self.colormap = Some(colormap);
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(LineStyle::parse(style));
        self
    }

    /// Attach a colorbar, optionally labelled
    pub fn with_colorbar(mut self, label: Option<&str>) -> Self {
        self.add_colorbar = true;
        self.colorbar_label = label.map(str::to_string);
        self
    }

    pub fn with_cell_edges(mut self, levels: Vec<bool>) -> Self {
        self.cell_edges = levels;
        self
    }

    pub fn with_patch_edges(mut self, levels: Vec<bool>) -> Self {
        self.patch_edges = levels;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }

    fn validate(&self, axes: &str) -> SpecResult<()> {
        if let Bounds::Explicit { min, max } = self.display {
            let reason = if !min.is_finite() || !max.is_finite() {
                Some(format!("display range [{}, {}] is not finite", min, max))
            } else if min > max {
                Some(format!("display range [{}, {}] is inverted", min, max))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(PlotSpecError::InvalidDisplayRange {
                    axes: axes.to_string(),
                    item: self.name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

/// One coordinate system within a figure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisGroup {
    pub title: String,
    pub layout: AxesLayout,

    /// Equal aspect ratio for the spatial axes
    pub scaled: bool,

    pub xlimits: Bounds,
    pub ylimits: Bounds,

    /// Drawn in order, later items on top
    pub items: Vec<PlotItem>,

    pub after_axes: Option<AxesDecoration>,
}

impl AxisGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            layout: AxesLayout::Full,
            scaled: false,
            xlimits: Bounds::Automatic,
            ylimits: Bounds::Automatic,
            items: Vec::new(),
            after_axes: None,
        }
    }

    pub fn with_layout(mut self, layout: AxesLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn scaled(mut self) -> Self {
        self.scaled = true;
        self
    }

    pub fn with_limits(mut self, xlimits: Bounds, ylimits: Bounds) -> Self {
        self.xlimits = xlimits;
        self.ylimits = ylimits;
        self
    }

    pub fn with_item(mut self, item: PlotItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_decoration(mut self, decoration: AxesDecoration) -> Self {
        self.after_axes = Some(decoration);
        self
    }

    pub fn item(&self, name: &str) -> Option<&PlotItem> {
        self.items.iter().find(|i| i.name == name)
    }

    fn validate(&self) -> SpecResult<()> {
        self.xlimits.validate(&format!("{} xlimits", self.title))?;
        self.ylimits.validate(&format!("{} ylimits", self.title))?;
        for item in &self.items {
            item.validate(&self.title)?;
        }
        Ok(())
    }
}

/// Whether a figure is drawn per frame or per gauge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    #[default]
    EachFrame,
    EachGauge,
}

/// A numbered container of axis-groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub name: String,
    pub number: u32,
    pub kind: FigureKind,
    pub size: Option<FigureSize>,

    /// Whether the figure is produced at all
    pub show: bool,

    /// Clear the canvas before each gauge (gauge figures only)
    pub clear_each_gauge: bool,

    pub axes: Vec<AxisGroup>,
}

impl Figure {
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
            kind: FigureKind::EachFrame,
            size: None,
            show: true,
            clear_each_gauge: false,
            axes: Vec::new(),
        }
    }

    /// A figure drawn once per gauge, clearing between gauges
    pub fn each_gauge(name: impl Into<String>, number: u32) -> Self {
        Self {
            kind: FigureKind::EachGauge,
            clear_each_gauge: true,
            ..Self::new(name, number)
        }
    }

    pub fn with_size(mut self, size: FigureSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }

    pub fn with_axes(mut self, axes: AxisGroup) -> Self {
        self.axes.push(axes);
        self
    }

    pub fn is_gauge_figure(&self) -> bool {
        self.kind == FigureKind::EachGauge
    }
}

/// The full, validated set of figures for one run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotTree {
    figures: Vec<Figure>,

    /// Hook run before every frame
    pub before_frame: FrameSetup,

    /// Title annotation used by the decorations
    pub time: TimeAnnotation,
}

impl PlotTree {
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn figure(&self, number: u32) -> Option<&Figure> {
        self.figures.iter().find(|f| f.number == number)
    }

    pub fn figure_by_name(&self, name: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.name == name)
    }

    pub fn frame_figures(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter().filter(|f| !f.is_gauge_figure())
    }

    pub fn gauge_figures(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter().filter(|f| f.is_gauge_figure())
    }

    /// Figures with `show` set
    pub fn visible(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter().filter(|f| f.show)
    }

    /// Serialize the tree for an engine in another process
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Collects figures, hands out automatic numbers, validates on finish
#[derive(Debug)]
pub struct PlotTreeBuilder {
    figures: Vec<Figure>,
    next_auto: u32,
}

impl Default for PlotTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotTreeBuilder {
    pub fn new() -> Self {
        Self {
            figures: Vec::new(),
            next_auto: AUTO_FIGURE_BASE,
        }
    }

    /// Next free automatic figure number
    pub fn auto_number(&mut self) -> u32 {
        self.next_auto += 1;
        self.next_auto
    }

    pub fn push(&mut self, figure: Figure) -> &mut Self {
        self.figures.push(figure);
        self
    }

    pub fn finish(self, before_frame: FrameSetup, time: TimeAnnotation) -> SpecResult<PlotTree> {
        let mut seen: HashMap<u32, &str> = HashMap::new();
        for figure in &self.figures {
            if let Some(first) = seen.insert(figure.number, &figure.name) {
                return Err(PlotSpecError::DuplicateFigureNumber {
                    number: figure.number,
                    first: first.to_string(),
                    second: figure.name.clone(),
                });
            }
            if figure.axes.is_empty() {
                return Err(PlotSpecError::EmptyFigure {
                    name: figure.name.clone(),
                });
            }
            for axes in &figure.axes {
                axes.validate()?;
            }
        }

        Ok(PlotTree {
            figures: self.figures,
            before_frame,
            time,
        })
    }
}
