//! surgeplot-core - Plot specification model for storm-surge simulation output
//!
//! This crate declares what a rendering engine draws for each output frame
//! and each gauge of a shallow-water storm-surge run, and supplies the field
//! computations and hooks the engine calls while drawing.
//!
//! # Key Components
//!
//! - **Fields**: Velocities, speed, wet surface, land and bed elevation
//!   derived from the conserved variables, plus 1D cross-sections
//! - **PlotTree**: Figures, axis-groups and plot items built from domain
//!   metadata and [`PlotSettings`]
//! - **Hooks**: The before-frame setup and the after-axes decorations
//! - **Render**: The per-frame walk that resolves items, skips what cannot
//!   be resolved, and decorates each axes through an [`AxesCanvas`]
//! - **ReportParameters**: Which images are printed and how the HTML and
//!   LaTeX index pages are laid out
//!
//! # Conserved Variables
//!
//! Frames store `[h, hu, hv, eta]` at indices 0 through 3. Derived fields
//! are unmasked except for the wet-surface and land fields, which split the
//! domain at the dry tolerance.

pub mod axis;
pub mod build;
pub mod canvas;
pub mod colormap;
pub mod config;
pub mod error;
pub mod fields;
pub mod frame;
pub mod hooks;
pub mod metadata;
pub mod render;
pub mod report;
pub mod spec;

pub use axis::*;
pub use build::build_plot_tree;
pub use canvas::{AxesCanvas, LinePattern, LineStyle};
pub use colormap::{Color, ColorStop, ColormapSpec};
pub use config::PlotSettings;
pub use error::{
    ConfigError, FieldError, FrameError, PlotSpecError, SurgePlotError, SurgePlotResult,
};
pub use fields::*;
pub use frame::*;
pub use hooks::{AxesDecoration, BeforeFrame, DecorationContext, FrameSetup, TimeAnnotation};
pub use metadata::{DomainMetadata, Gauge};
pub use render::{FrameRenderer, RenderReport, RenderSource, SkippedItem};
pub use report::*;
pub use spec::*;
