//! Per-frame simulation state and the per-frame user context
//!
//! `FrameState` wraps the conserved variables of one output frame on a
//! common grid together with the physical coordinates of each sample.
//! `FrameContext` is the per-frame bag the before-frame hook fills and the
//! decoration hooks read. A context belongs to exactly one frame.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, FieldError, FieldResult, FrameError, FrameResult};

/// Index of water depth `h`
pub const DEPTH: usize = 0;
/// Index of x-momentum `hu`
pub const X_MOMENTUM: usize = 1;
/// Index of y-momentum `hv`
pub const Y_MOMENTUM: usize = 2;
/// Index of surface elevation `eta`
pub const SURFACE: usize = 3;

/// Conserved variables and coordinates of one output frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    /// Variables indexed as `[var, i, j]`
    q: Array3<f64>,
    /// x-coordinate of each sample, `[i, j]`
    x: Array2<f64>,
    /// y-coordinate of each sample, `[i, j]`
    y: Array2<f64>,
}

impl FrameState {
    /// Create a frame, checking that coordinates match the data grid
    pub fn new(q: Array3<f64>, x: Array2<f64>, y: Array2<f64>) -> FrameResult<Self> {
        let (nvars, mx, my) = q.dim();
        if nvars == 0 {
            return Err(FrameError::TooFewVariables {
                available: 0,
                required: 1,
            });
        }
        for (axis, coords) in [("x", &x), ("y", &y)] {
            if coords.dim() != (mx, my) {
                return Err(FrameError::ShapeMismatch {
                    axis: axis.to_string(),
                    expected: vec![mx, my],
                    actual: coords.shape().to_vec(),
                });
            }
        }
        for (axis, coords, along) in [("x", &x, Axis(0)), ("y", &y, Axis(1))] {
            check_increasing(axis, coords, along)?;
        }
        Ok(Self { q, x, y })
    }

    /// Create a frame on a uniform grid of cell centers
    pub fn on_uniform_grid(q: Array3<f64>, lower: [f64; 2], upper: [f64; 2]) -> FrameResult<Self> {
        let (_, mx, my) = q.dim();
        let dx = (upper[0] - lower[0]) / mx.max(1) as f64;
        let dy = (upper[1] - lower[1]) / my.max(1) as f64;
        let x = Array2::from_shape_fn((mx, my), |(i, _)| lower[0] + (i as f64 + 0.5) * dx);
        let y = Array2::from_shape_fn((mx, my), |(_, j)| lower[1] + (j as f64 + 0.5) * dy);
        Self::new(q, x, y)
    }

    /// Number of stored variables
    pub fn num_vars(&self) -> usize {
        self.q.len_of(Axis(0))
    }

    /// Grid shape `(rows, columns)`
    pub fn grid_shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// One variable over the grid
    pub fn var(&self, index: usize) -> FieldResult<ArrayView2<'_, f64>> {
        if index >= self.num_vars() {
            return Err(FieldError::MissingIndex {
                index,
                available: self.num_vars(),
            });
        }
        Ok(self.q.index_axis(Axis(0), index))
    }

    pub fn depth(&self) -> FieldResult<ArrayView2<'_, f64>> {
        self.var(DEPTH)
    }

    pub fn x_momentum(&self) -> FieldResult<ArrayView2<'_, f64>> {
        self.var(X_MOMENTUM)
    }

    pub fn y_momentum(&self) -> FieldResult<ArrayView2<'_, f64>> {
        self.var(Y_MOMENTUM)
    }

    pub fn surface(&self) -> FieldResult<ArrayView2<'_, f64>> {
        self.var(SURFACE)
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }
}

/// x must grow with the row index and y with the column index
fn check_increasing(axis: &str, coords: &Array2<f64>, along: Axis) -> FrameResult<()> {
    for lane in coords.lanes(along) {
        // NaN has no ordering and fails the check
        let bad_step = lane
            .iter()
            .zip(lane.iter().skip(1))
            .position(|(a, b)| b.partial_cmp(a) != Some(Ordering::Greater));
        if let Some(step) = bad_step {
            return Err(FrameError::NonIncreasing {
                axis: axis.to_string(),
                index: step + 1,
            });
        }
    }
    Ok(())
}

/// Time series recorded at one gauge
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeSeries {
    /// Gauge number
    pub number: u32,
    /// Sample times
    t: Array1<f64>,
    /// Variables indexed as `[var, sample]`
    q: Array2<f64>,
}

impl GaugeSeries {
    pub fn new(number: u32, t: Array1<f64>, q: Array2<f64>) -> FrameResult<Self> {
        if q.len_of(Axis(1)) != t.len() {
            return Err(FrameError::SeriesLength {
                times: t.len(),
                samples: q.len_of(Axis(1)),
            });
        }
        Ok(Self { number, t, q })
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.t.view()
    }

    pub fn var(&self, index: usize) -> FieldResult<ArrayView1<'_, f64>> {
        let available = self.q.len_of(Axis(0));
        if index >= available {
            return Err(FieldError::MissingIndex { index, available });
        }
        Ok(self.q.index_axis(Axis(0), index))
    }
}

/// Frame number and simulation time handed to the hooks
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub frameno: usize,
    pub t: f64,
}

impl FrameInfo {
    pub fn new(frameno: usize, t: f64) -> Self {
        Self { frameno, t }
    }
}

/// A static polyline drawn over the data, in grid units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Overlay {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// First and last vertex coincide
    pub fn is_closed(&self) -> bool {
        match (self.x.first(), self.x.last(), self.y.first(), self.y.last()) {
            (Some(x0), Some(x1), Some(y0), Some(y1)) => self.x.len() > 2 && x0 == x1 && y0 == y1,
            _ => false,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.x.len() != self.y.len() {
            return Err(ConfigError::OverlayMismatch {
                name: self.name.clone(),
                x_len: self.x.len(),
                y_len: self.y.len(),
            });
        }
        if let Some(&value) = self.x.iter().chain(self.y.iter()).find(|v| !v.is_finite()) {
            return Err(ConfigError::NotFinite {
                name: format!("overlay '{}'", self.name),
                value,
            });
        }
        Ok(())
    }
}

/// Free-form value stored in the context's user bag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserValue {
    Scalar(f64),
    Series(Vec<f64>),
    Text(String),
}

/// Per-frame user data, created fresh by the engine for every frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    /// Frame being processed
    pub frame: FrameInfo,

    /// Depth below which a cell is drawn as land
    dry_tolerance: Option<f64>,

    /// Static overlay polylines
    overlays: Vec<Overlay>,

    /// Additional values keyed by name
    user: BTreeMap<String, UserValue>,
}

impl FrameContext {
    /// Empty context for a frame
    pub fn new(frame: FrameInfo) -> Self {
        Self {
            frame,
            dry_tolerance: None,
            overlays: Vec::new(),
            user: BTreeMap::new(),
        }
    }

    pub fn dry_tolerance(&self) -> Option<f64> {
        self.dry_tolerance
    }

    pub fn set_dry_tolerance(&mut self, value: f64) {
        self.dry_tolerance = Some(value);
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Replace the overlay set
    pub fn set_overlays(&mut self, overlays: Vec<Overlay>) {
        self.overlays = overlays;
    }

    /// Every overlay x-coordinate, in overlay then vertex order
    pub fn overlay_x(&self) -> impl Iterator<Item = f64> + '_ {
        self.overlays.iter().flat_map(|o| o.x.iter().copied())
    }

    pub fn get(&self, key: &str) -> Option<&UserValue> {
        self.user.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: UserValue) {
        self.user.insert(key.into(), value);
    }
}
