//! Derived fields computed from the conserved variables
//!
//! Every function here is pure: it reads the state and returns a new array.
//! Velocities are plain elementwise quotients. A cell with zero depth yields
//! a non-finite value and it is left for the renderer to mask or display.

use ndarray::{Array, Array1, Array2, ArrayView, ArrayView1, Dimension, Ix1, Ix2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::frame::{FrameContext, FrameState, GaugeSeries, DEPTH, SURFACE, X_MOMENTUM, Y_MOMENTUM};

/// Indexed access to conserved variables, on a grid or along a time series
pub trait ConservedState {
    type Dim: Dimension;

    /// One variable; missing indices are a resolution error
    fn variable(&self, index: usize) -> FieldResult<ArrayView<'_, f64, Self::Dim>>;
}

impl ConservedState for FrameState {
    type Dim = Ix2;

    fn variable(&self, index: usize) -> FieldResult<ArrayView<'_, f64, Ix2>> {
        self.var(index)
    }
}

impl ConservedState for GaugeSeries {
    type Dim = Ix1;

    fn variable(&self, index: usize) -> FieldResult<ArrayView<'_, f64, Ix1>> {
        self.var(index)
    }
}

/// `hu / h`, elementwise and unmasked
pub fn water_x_velocity<S: ConservedState>(state: &S) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let hu = state.variable(X_MOMENTUM)?;
    Ok(Zip::from(&hu).and(&h).map_collect(|&hu, &h| hu / h))
}

/// `hv / h`, elementwise and unmasked
pub fn water_y_velocity<S: ConservedState>(state: &S) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let hv = state.variable(Y_MOMENTUM)?;
    Ok(Zip::from(&hv).and(&h).map_collect(|&hv, &h| hv / h))
}

/// Magnitude of the depth-averaged velocity
pub fn current_speed<S: ConservedState>(state: &S) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let hu = state.variable(X_MOMENTUM)?;
    let hv = state.variable(Y_MOMENTUM)?;
    Ok(Zip::from(&h)
        .and(&hu)
        .and(&hv)
        .map_collect(|&h, &hu, &hv| (hu / h).hypot(hv / h)))
}

/// Bed elevation inferred as `eta - h`, including dry cells
pub fn synthetic_topography<S: ConservedState>(state: &S) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let eta = state.variable(SURFACE)?;
    Ok(bed_elevation(eta, h))
}

/// Surface elevation on wet cells, NaN where `h <= dry_tolerance`
pub fn wet_surface<S: ConservedState>(
    state: &S,
    dry_tolerance: f64,
) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let eta = state.variable(SURFACE)?;
    Ok(Zip::from(&h).and(&eta).map_collect(|&h, &eta| {
        if h > dry_tolerance {
            eta
        } else {
            f64::NAN
        }
    }))
}

/// Bed elevation on dry cells, NaN where `h > dry_tolerance`
pub fn land<S: ConservedState>(state: &S, dry_tolerance: f64) -> FieldResult<Array<f64, S::Dim>> {
    let h = state.variable(DEPTH)?;
    let eta = state.variable(SURFACE)?;
    Ok(Zip::from(&h).and(&eta).map_collect(|&h, &eta| {
        if h <= dry_tolerance {
            eta - h
        } else {
            f64::NAN
        }
    }))
}

fn bed_elevation<D: Dimension>(
    eta: ArrayView<'_, f64, D>,
    h: ArrayView<'_, f64, D>,
) -> Array<f64, D> {
    Zip::from(&eta).and(&h).map_collect(|&eta, &h| eta - h)
}

/// A one-dimensional cross-section: coordinates paired with values
#[derive(Clone, Debug, PartialEq)]
pub struct Slice1D {
    pub coords: Array1<f64>,
    pub values: Array1<f64>,
}

impl Slice1D {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn column<'a>(field: &'a Array2<f64>, j: usize) -> FieldResult<ArrayView1<'a, f64>> {
    let columns = field.ncols();
    if j >= columns {
        return Err(FieldError::SliceOutOfBounds { index: j, columns });
    }
    Ok(field.column(j))
}

fn slice_of(state: &FrameState, values: ArrayView1<'_, f64>, j: usize) -> FieldResult<Slice1D> {
    let x = state.x();
    if j >= x.ncols() {
        return Err(FieldError::SliceOutOfBounds {
            index: j,
            columns: x.ncols(),
        });
    }
    Ok(Slice1D {
        coords: x.column(j).to_owned(),
        values: values.to_owned(),
    })
}

/// `(x[:, j], eta[:, j])`
pub fn slice_surface(state: &FrameState, j: usize) -> FieldResult<Slice1D> {
    let eta = state.surface()?;
    if j >= eta.ncols() {
        return Err(FieldError::SliceOutOfBounds {
            index: j,
            columns: eta.ncols(),
        });
    }
    slice_of(state, eta.column(j), j)
}

/// `(x[:, j], hu[:, j])`
pub fn slice_momentum(state: &FrameState, j: usize) -> FieldResult<Slice1D> {
    let hu = state.x_momentum()?;
    if j >= hu.ncols() {
        return Err(FieldError::SliceOutOfBounds {
            index: j,
            columns: hu.ncols(),
        });
    }
    slice_of(state, hu.column(j), j)
}

/// `(x[:, j], hu[:, j] / h[:, j])`, unmasked
pub fn slice_velocity(state: &FrameState, j: usize) -> FieldResult<Slice1D> {
    let u = water_x_velocity(state)?;
    let u_col = column(&u, j)?;
    slice_of(state, u_col, j)
}

/// Bed elevation along a gauge record
pub fn gauge_topography(series: &GaugeSeries) -> FieldResult<Array1<f64>> {
    synthetic_topography(series)
}

/// A derived field a plot item can select instead of a raw variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedField {
    #[serde(rename = "water-x-velocity")]
    XVelocity,
    #[serde(rename = "water-y-velocity")]
    YVelocity,
    #[serde(rename = "current-speed")]
    Speed,
    #[serde(rename = "wet-surface")]
    WetSurface,
    #[serde(rename = "land")]
    Land,
    #[serde(rename = "synthetic-topography")]
    Topography,
}

impl DerivedField {
    pub fn name(&self) -> &'static str {
        match self {
            DerivedField::XVelocity => "water-x-velocity",
            DerivedField::YVelocity => "water-y-velocity",
            DerivedField::Speed => "current-speed",
            DerivedField::WetSurface => "wet-surface",
            DerivedField::Land => "land",
            DerivedField::Topography => "synthetic-topography",
        }
    }

    /// Compute the field; masking variants read the dry tolerance from `ctx`
    pub fn evaluate<S: ConservedState>(
        &self,
        state: &S,
        ctx: &FrameContext,
    ) -> FieldResult<Array<f64, S::Dim>> {
        match self {
            DerivedField::XVelocity => water_x_velocity(state),
            DerivedField::YVelocity => water_y_velocity(state),
            DerivedField::Speed => current_speed(state),
            DerivedField::Topography => synthetic_topography(state),
            DerivedField::WetSurface => wet_surface(state, self.dry_tolerance(ctx)?),
            DerivedField::Land => land(state, self.dry_tolerance(ctx)?),
        }
    }

    fn dry_tolerance(&self, ctx: &FrameContext) -> FieldResult<f64> {
        ctx.dry_tolerance().ok_or_else(|| FieldError::MissingContext {
            field: self.name().to_string(),
            key: "dry_tolerance".to_string(),
        })
    }
}

/// Which cross-section function a slice item uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliceField {
    Surface,
    Momentum,
    Velocity,
}

/// A cross-section at a fixed column, captured when the tree is built
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSpec {
    pub field: SliceField,
    pub index: usize,
}

impl SliceSpec {
    pub fn new(field: SliceField, index: usize) -> Self {
        Self { field, index }
    }

    pub fn evaluate(&self, state: &FrameState) -> FieldResult<Slice1D> {
        match self.field {
            SliceField::Surface => slice_surface(state, self.index),
            SliceField::Momentum => slice_momentum(state, self.index),
            SliceField::Velocity => slice_velocity(state, self.index),
        }
    }
}

/// What a plot item draws: a stored variable or a derived field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSelector {
    Index(usize),
    Derived(DerivedField),
}

impl FieldSelector {
    pub fn resolve<S: ConservedState>(
        &self,
        state: &S,
        ctx: &FrameContext,
    ) -> FieldResult<Array<f64, S::Dim>> {
        match self {
            FieldSelector::Index(index) => Ok(state.variable(*index)?.to_owned()),
            FieldSelector::Derived(field) => field.evaluate(state, ctx),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FieldSelector::Index(index) => format!("q[{}]", index),
            FieldSelector::Derived(field) => field.name().to_string(),
        }
    }
}

impl From<usize> for FieldSelector {
    fn from(index: usize) -> Self {
        FieldSelector::Index(index)
    }
}

impl From<DerivedField> for FieldSelector {
    fn from(field: DerivedField) -> Self {
        FieldSelector::Derived(field)
    }
}
