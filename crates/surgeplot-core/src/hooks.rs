//! Per-frame and per-axes hooks
//!
//! `FrameSetup` runs once before each frame and fills the frame context.
//! `AxesDecoration` runs after an axes' plot items are drawn and issues
//! annotation and overlay calls on the canvas. Decorations only read the
//! context; everything they need is passed in explicitly.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::canvas::{AxesCanvas, LineStyle};
use crate::config::PlotSettings;
use crate::frame::{FrameContext, FrameInfo, Overlay};
use crate::metadata::{DomainMetadata, Gauge};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Hook invoked once per frame before any axes is drawn
pub trait BeforeFrame {
    fn populate(&self, ctx: &mut FrameContext, frame: &FrameInfo);
}

/// Writes the dry tolerance and overlay geometry into the frame context
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSetup {
    pub dry_tolerance: f64,
    pub overlays: Vec<Overlay>,
}

impl FrameSetup {
    pub fn from_settings(settings: &PlotSettings) -> Self {
        Self {
            dry_tolerance: settings.dry_tolerance,
            overlays: settings.overlays.clone(),
        }
    }
}

impl BeforeFrame for FrameSetup {
    fn populate(&self, ctx: &mut FrameContext, frame: &FrameInfo) {
        ctx.frame = *frame;
        ctx.set_dry_tolerance(self.dry_tolerance);
        ctx.set_overlays(self.overlays.clone());
    }
}

/// How simulation time is written into axes titles
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAnnotation {
    /// Landfall time in seconds; day counts are relative to it
    pub landfall: f64,
    /// Calendar time of t = 0; switches the annotation to dates
    pub reference: Option<DateTime<Utc>>,
}

impl TimeAnnotation {
    pub fn from_metadata(meta: &DomainMetadata) -> Self {
        Self {
            landfall: meta.landfall.unwrap_or(0.0),
            reference: meta.reference_time,
        }
    }

    /// `"<title> at day 1.25"` or `"<title> at 2008-09-13 06:00 UTC"`
    ///
    /// A time that cannot be placed on the calendar falls back to the day
    /// count.
    pub fn title(&self, title: &str, t: f64) -> String {
        match self.calendar_time(t) {
            Some(when) => format!("{} at {}", title, when.format("%Y-%m-%d %H:%M UTC")),
            None => format!("{} at day {:.2}", title, (t - self.landfall) / SECONDS_PER_DAY),
        }
    }

    fn calendar_time(&self, t: f64) -> Option<DateTime<Utc>> {
        let reference = self.reference?;
        let millis = (t * 1000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        let offset = TimeDelta::try_milliseconds(millis as i64)?;
        reference.checked_add_signed(offset)
    }
}

/// Everything a decoration reads while drawing
#[derive(Clone, Copy, Debug)]
pub struct DecorationContext<'a> {
    /// The frame's context, populated by the before-frame hook
    pub frame: &'a FrameContext,
    /// Title of the axes being decorated
    pub axes_title: &'a str,
    /// Recorded gauge locations
    pub gauges: &'a [Gauge],
    pub time: &'a TimeAnnotation,
    /// Gauge being drawn, for per-gauge figures
    pub gauge: Option<u32>,
}

/// Decoration run after an axes' items are drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxesDecoration {
    /// Time title, gauge markers, dashed overlay outlines
    Domain,
    /// Time title, vertical dashed segments at every overlay x
    Slice { y_bounds: (f64, f64) },
    /// Station title and axis labels for gauge time series
    Gauge { ylabel: String },
}

impl AxesDecoration {
    pub fn apply(&self, cx: &DecorationContext<'_>, canvas: &mut dyn AxesCanvas) {
        match self {
            AxesDecoration::Domain => after_axes(cx, canvas),
            AxesDecoration::Slice { y_bounds } => after_axes_slice(cx, *y_bounds, canvas),
            AxesDecoration::Gauge { ylabel } => gauge_after_axes(cx, ylabel, canvas),
        }
    }
}

fn time_title(cx: &DecorationContext<'_>, canvas: &mut dyn AxesCanvas) {
    canvas.set_title(&cx.time.title(cx.axes_title, cx.frame.frame.t));
}

fn after_axes(cx: &DecorationContext<'_>, canvas: &mut dyn AxesCanvas) {
    time_title(cx, canvas);
    canvas.plot_gauges(cx.gauges, LineStyle::parse("ko"), true);
    for overlay in cx.frame.overlays() {
        canvas.plot_line(&overlay.x, &overlay.y, LineStyle::parse("k--"));
    }
}

fn after_axes_slice(
    cx: &DecorationContext<'_>,
    y_bounds: (f64, f64),
    canvas: &mut dyn AxesCanvas,
) {
    time_title(cx, canvas);
    let style = LineStyle::parse("k--");
    for x in cx.frame.overlay_x() {
        canvas.plot_line(&[x, x], &[y_bounds.0, y_bounds.1], style);
    }
}

fn gauge_after_axes(cx: &DecorationContext<'_>, ylabel: &str, canvas: &mut dyn AxesCanvas) {
    match cx.gauge {
        Some(number) => canvas.set_title(&format!("Station {}", number)),
        None => canvas.set_title(cx.axes_title),
    }
    canvas.set_xlabel("Time (s)");
    canvas.grid(true);
    canvas.set_ylabel(ylabel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_frame_setup_populates_context() {
        let setup = FrameSetup::from_settings(&PlotSettings::default());
        let mut ctx = FrameContext::new(FrameInfo::new(0, 0.0));
        setup.populate(&mut ctx, &FrameInfo::new(4, 3600.0));

        assert_eq!(ctx.frame.frameno, 4);
        assert_eq!(ctx.dry_tolerance(), Some(1e-2));
        assert_eq!(ctx.overlays().len(), 1);
        assert_eq!(ctx.overlay_x().count(), 5);
    }

    #[test]
    fn test_frame_setup_is_idempotent() {
        let setup = FrameSetup::from_settings(&PlotSettings::default());
        let frame = FrameInfo::new(1, 900.0);
        let mut ctx = FrameContext::new(frame);
        setup.populate(&mut ctx, &frame);
        let once = ctx.clone();
        setup.populate(&mut ctx, &frame);
        assert_eq!(ctx, once);
    }

    #[test]
    fn test_time_title_in_days() {
        let time = TimeAnnotation::default();
        assert_eq!(time.title("Surface", 129_600.0), "Surface at day 1.50");

        let relative = TimeAnnotation {
            landfall: 86_400.0,
            reference: None,
        };
        assert_eq!(relative.title("Surface", 0.0), "Surface at day -1.00");
    }

    #[test]
    fn test_time_title_with_reference_date() {
        let time = TimeAnnotation {
            landfall: 0.0,
            reference: Some(Utc.with_ymd_and_hms(2008, 9, 13, 0, 0, 0).unwrap()),
        };
        assert_eq!(time.title("Currents", 6.0 * 3600.0), "Currents at 2008-09-13 06:00 UTC");
    }

    #[test]
    fn test_time_title_out_of_calendar_range() {
        let time = TimeAnnotation {
            landfall: 0.0,
            reference: Some(Utc.with_ymd_and_hms(2008, 9, 13, 0, 0, 0).unwrap()),
        };
        assert_eq!(time.title("Surface", 1e17), "Surface at day 1157407407407.41");
        assert!(time.title("Surface", f64::NEG_INFINITY).starts_with("Surface at day"));
        assert!(time.title("Surface", f64::NAN).starts_with("Surface at day"));
    }
}
