//! Walks the plot tree for one frame or one gauge
//!
//! For each visible axis-group the walk resolves every visible item against
//! the data, hands the result to the canvas, then runs the axes decoration.
//! An item whose selector does not resolve is skipped with a warning; the
//! rest of the frame is still drawn.
//!
//! When the `parallel` feature is enabled, [`FrameRenderer::render_frames`]
//! draws frames on the rayon pool, each with its own context and canvas.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::canvas::AxesCanvas;
use crate::error::FieldError;
use crate::frame::{FrameContext, FrameInfo, FrameState, GaugeSeries};
use crate::hooks::{BeforeFrame, DecorationContext};
use crate::metadata::Gauge;
use crate::spec::{AxisGroup, Figure, PlotItem, PlotKind, PlotTree};

/// A plot item left out of a frame
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedItem {
    pub figure: u32,
    pub axes: String,
    pub item: String,
    pub error: FieldError,
}

/// Outcome of drawing one frame or one gauge
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Items handed to the canvas
    pub drawn: usize,
    pub skipped: Vec<SkippedItem>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn merge(&mut self, other: RenderReport) {
        self.drawn += other.drawn;
        self.skipped.extend(other.skipped);
    }
}

/// The data an axis-group is drawn from
#[derive(Clone, Copy, Debug)]
pub enum RenderSource<'a> {
    Frame(&'a FrameState),
    Gauge(&'a GaugeSeries),
}

/// Drives a canvas through the tree
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer<'a> {
    tree: &'a PlotTree,
    gauges: &'a [Gauge],
}

impl<'a> FrameRenderer<'a> {
    pub fn new(tree: &'a PlotTree, gauges: &'a [Gauge]) -> Self {
        Self { tree, gauges }
    }

    /// Fresh context with the before-frame hook applied
    pub fn prepare(&self, frame: FrameInfo) -> FrameContext {
        let mut ctx = FrameContext::new(frame);
        self.tree.before_frame.populate(&mut ctx, &frame);
        ctx
    }

    /// Draw every visible per-frame figure
    pub fn render_frame(
        &self,
        frame: FrameInfo,
        state: &FrameState,
        canvas: &mut dyn AxesCanvas,
    ) -> RenderReport {
        let ctx = self.prepare(frame);
        let mut report = RenderReport::default();

        for figure in self.tree.frame_figures().filter(|f| f.show) {
            for axes in &figure.axes {
                let outcome =
                    self.render_axes(figure, axes, RenderSource::Frame(state), &ctx, None, canvas);
                report.merge(outcome);
            }
        }

        tracing::debug!(
            frameno = frame.frameno,
            drawn = report.drawn,
            skipped = report.skipped.len(),
            "rendered frame"
        );
        report
    }

    /// Draw every visible per-gauge figure for one gauge record
    pub fn render_gauge(&self, series: &GaugeSeries, canvas: &mut dyn AxesCanvas) -> RenderReport {
        let t0 = series.times().iter().next().copied().unwrap_or(0.0);
        let ctx = self.prepare(FrameInfo::new(0, t0));
        let mut report = RenderReport::default();

        for figure in self.tree.gauge_figures().filter(|f| f.show) {
            for axes in &figure.axes {
                let outcome = self.render_axes(
                    figure,
                    axes,
                    RenderSource::Gauge(series),
                    &ctx,
                    Some(series.number),
                    canvas,
                );
                report.merge(outcome);
            }
        }

        tracing::debug!(gauge = series.number, drawn = report.drawn, "rendered gauge");
        report
    }

    /// Draw one axis-group: items in order, then the decoration
    pub fn render_axes(
        &self,
        figure: &Figure,
        axes: &AxisGroup,
        source: RenderSource<'_>,
        ctx: &FrameContext,
        gauge: Option<u32>,
        canvas: &mut dyn AxesCanvas,
    ) -> RenderReport {
        let mut report = RenderReport::default();
        canvas.begin_axes(figure, axes);

        for item in axes.items.iter().filter(|item| item.show) {
            match draw_item(item, source, ctx, canvas) {
                Ok(()) => report.drawn += 1,
                Err(error) => {
                    tracing::warn!(
                        figure = figure.number,
                        axes = %axes.title,
                        item = %item.name,
                        %error,
                        "skipping plot item"
                    );
                    report.skipped.push(SkippedItem {
                        figure: figure.number,
                        axes: axes.title.clone(),
                        item: item.name.clone(),
                        error,
                    });
                }
            }
        }

        if let Some(decoration) = &axes.after_axes {
            let cx = DecorationContext {
                frame: ctx,
                axes_title: &axes.title,
                gauges: self.gauges,
                time: &self.tree.time,
                gauge,
            };
            decoration.apply(&cx, canvas);
        }

        report
    }

    /// Draw many frames, one context and one canvas per frame
    pub fn render_frames<C, F>(
        &self,
        frames: &[(FrameInfo, FrameState)],
        make_canvas: F,
    ) -> Vec<(RenderReport, C)>
    where
        C: AxesCanvas + Send,
        F: Fn(&FrameInfo) -> C + Sync,
    {
        let draw = |(frame, state): &(FrameInfo, FrameState)| {
            let mut canvas = make_canvas(frame);
            let report = self.render_frame(*frame, state, &mut canvas);
            (report, canvas)
        };

        #[cfg(feature = "parallel")]
        let rendered = frames.par_iter().map(draw).collect();

        #[cfg(not(feature = "parallel"))]
        let rendered = frames.iter().map(draw).collect();

        rendered
    }
}

fn draw_item(
    item: &PlotItem,
    source: RenderSource<'_>,
    ctx: &FrameContext,
    canvas: &mut dyn AxesCanvas,
) -> Result<(), FieldError> {
    match (item.kind, source) {
        (PlotKind::ColorGrid, RenderSource::Frame(state)) => {
            let values = item.selector.resolve(state, ctx)?;
            canvas.color_grid(item, state.x(), state.y(), values.view());
        }
        (PlotKind::Slice { slice }, RenderSource::Frame(state)) => {
            let line = slice.evaluate(state)?;
            canvas.line(item, line.coords.view(), line.values.view());
        }
        (PlotKind::Line, RenderSource::Gauge(series)) => {
            let values = item.selector.resolve(series, ctx)?;
            canvas.line(item, series.times(), values.view());
        }
        (kind, _) => {
            return Err(FieldError::KindMismatch {
                kind: kind.name().to_string(),
                selector: item.selector.describe(),
            });
        }
    }
    Ok(())
}
