//! Synthetic frames, gauge records and metadata

use ndarray::{Array1, Array2, Array3, Axis};
use surgeplot_core::{DomainMetadata, FrameState, Gauge, GaugeSeries};

/// Domain used throughout the integration tests
pub fn domain() -> DomainMetadata {
    DomainMetadata::new([-100e3, -50e3], [100e3, 50e3])
}

/// Domain with a known simulation time range
pub fn timed_domain() -> DomainMetadata {
    domain().with_time_range(-2.0 * 86_400.0, 1.0 * 86_400.0)
}

pub fn gauges() -> Vec<Gauge> {
    vec![
        Gauge::new(1, -50e3, 0.0),
        Gauge::new(2, 0.0, 0.0),
        Gauge::new(3, 50e3, 0.0),
    ]
}

/// Stack `[h, hu, hv, eta]` planes into a frame on the test domain
pub fn frame_from(
    h: Array2<f64>,
    hu: Array2<f64>,
    hv: Array2<f64>,
    eta: Array2<f64>,
) -> FrameState {
    let (mx, my) = h.dim();
    let mut q = Array3::<f64>::zeros((4, mx, my));
    q.index_axis_mut(Axis(0), 0).assign(&h);
    q.index_axis_mut(Axis(0), 1).assign(&hu);
    q.index_axis_mut(Axis(0), 2).assign(&hv);
    q.index_axis_mut(Axis(0), 3).assign(&eta);
    FrameState::on_uniform_grid(q, [-100e3, -50e3], [100e3, 50e3])
        .unwrap_or_else(|e| panic!("Failed to build frame: {}", e))
}

/// Still water over a sloping beach: deep on the left, dry on the right
pub fn beach_frame(mx: usize, my: usize) -> FrameState {
    let h = Array2::from_shape_fn((mx, my), |(i, _)| {
        let depth = 10.0 * (1.0 - 2.0 * i as f64 / (mx - 1).max(1) as f64);
        depth.max(0.0)
    });
    let hu = h.mapv(|h| 0.5 * h);
    let hv = h.mapv(|h| -0.25 * h);
    let eta = Array2::from_shape_fn((mx, my), |(i, _)| {
        if h[[i, 0]] > 0.0 {
            0.0
        } else {
            2.0 * i as f64 / mx as f64
        }
    });
    frame_from(h, hu, hv, eta)
}

/// Frame with only the first `nvars` variables present
pub fn truncated_frame(nvars: usize) -> FrameState {
    let q = Array3::<f64>::ones((nvars, 4, 4));
    FrameState::on_uniform_grid(q, [-100e3, -50e3], [100e3, 50e3])
        .unwrap_or_else(|e| panic!("Failed to build frame: {}", e))
}

/// Gauge record with a rising surface
pub fn gauge_series(number: u32, samples: usize) -> GaugeSeries {
    let t = Array1::linspace(0.0, 3600.0 * (samples - 1) as f64, samples);
    let mut q = Array2::<f64>::zeros((4, samples));
    q.row_mut(0).fill(5.0);
    q.row_mut(1).assign(&Array1::linspace(0.0, 1.0, samples));
    q.row_mut(3).assign(&Array1::linspace(0.0, 0.5, samples));
    GaugeSeries::new(number, t, q).unwrap_or_else(|e| panic!("Failed to build gauge: {}", e))
}
