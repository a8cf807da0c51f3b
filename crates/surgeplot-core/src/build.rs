//! Assembles the storm-surge figure set from domain metadata and settings
//!
//! The build is a pure function of its inputs: the same metadata and
//! settings always produce the same tree.

use crate::axis::{AxesLayout, Bounds};
use crate::colormap;
use crate::config::PlotSettings;
use crate::error::SpecResult;
use crate::fields::{DerivedField, FieldSelector, SliceField, SliceSpec};
use crate::frame::{SURFACE, X_MOMENTUM, Y_MOMENTUM};
use crate::hooks::{AxesDecoration, FrameSetup, TimeAnnotation};
use crate::metadata::DomainMetadata;
use crate::spec::{AxisGroup, Figure, PlotItem, PlotTree, PlotTreeBuilder};

/// Refinement levels covered by the edge toggles
const AMR_LEVELS: usize = 10;

/// Build every figure for a run
pub fn build_plot_tree(meta: &DomainMetadata, settings: &PlotSettings) -> SpecResult<PlotTree> {
    settings.validate()?;
    meta.x_bounds().validate("domain x")?;
    meta.y_bounds().validate("domain y")?;

    let ctx = BuildContext { meta, settings };
    let mut builder = PlotTreeBuilder::new();

    builder.push(ctx.surface_figure());
    builder.push(ctx.speed_figure());
    builder.push(ctx.component_figure(
        "Velocity Components - Entire Domain",
        2,
        "Velocity",
        [DerivedField::XVelocity.into(), DerivedField::YVelocity.into()],
        settings.velocity_bounds(),
    ));
    builder.push(ctx.component_figure(
        "Momentum Components - Entire Domain",
        3,
        "Momentum",
        [X_MOMENTUM.into(), Y_MOMENTUM.into()],
        settings.momentum_bounds(),
    ));

    let number = builder.auto_number();
    builder.push(ctx.topography_figure(number));

    for (name, title, field, selector, bounds) in [
        (
            "Slice eta, y=0",
            "Surface Slice y = 0",
            SliceField::Surface,
            SURFACE,
            settings.surface_bounds(),
        ),
        (
            "Slice u, y=0",
            "Velocity-x Slice y = 0",
            SliceField::Velocity,
            X_MOMENTUM,
            settings.velocity_bounds(),
        ),
        (
            "Slice hu, y=0",
            "hu Slice y = 0",
            SliceField::Momentum,
            X_MOMENTUM,
            settings.momentum_bounds(),
        ),
    ] {
        let number = builder.auto_number();
        builder.push(ctx.slice_figure(name, number, title, field, selector, bounds));
    }

    let time_bounds = meta.time_bounds();
    if time_bounds.is_automatic() {
        tracing::debug!(
            t0 = ?meta.t0,
            tfinal = ?meta.tfinal,
            "simulation time range unusable, gauge figures use automatic x-limits"
        );
    }
    for (name, number, title, selector, ylabel) in [
        ("Gauge Surface", 300, "Surface", SURFACE, "Surface Height (m)"),
        ("Gauge X-Momentum", 301, "X Momentum", X_MOMENTUM, "X-Momentum (m^2/s)"),
        ("Gauge Y-Momentum", 302, "Y Momentum", Y_MOMENTUM, "Y-Momentum (m^2/s)"),
    ] {
        builder.push(gauge_figure(name, number, title, selector, ylabel, time_bounds));
    }

    let tree = builder.finish(
        FrameSetup::from_settings(settings),
        TimeAnnotation::from_metadata(meta),
    )?;
    tracing::debug!(figures = tree.len(), "built plot tree");
    Ok(tree)
}

/// Inputs shared by the figure constructors
struct BuildContext<'a> {
    meta: &'a DomainMetadata,
    settings: &'a PlotSettings,
}

impl BuildContext<'_> {
    /// Axes spanning the full domain with equal aspect
    fn domain_axes(&self, title: &str) -> AxisGroup {
        AxisGroup::new(title)
            .scaled()
            .with_limits(self.meta.x_bounds(), self.meta.y_bounds())
    }

    fn land_item(&self) -> PlotItem {
        let (min, max) = self.settings.land_range;
        PlotItem::color_grid("land", DerivedField::Land)
            .with_display(Bounds::explicit(min, max))
            .with_colormap(colormap::land())
            .with_cell_edges(vec![false; AMR_LEVELS])
            .with_patch_edges(vec![false; AMR_LEVELS])
    }

    fn surface_figure(&self) -> Figure {
        let surface = PlotItem::color_grid("surface", DerivedField::WetSurface)
            .with_display(self.settings.surface_bounds())
            .with_colormap(colormap::surface())
            .with_colorbar(Some("Surface Height (m)"))
            .with_cell_edges(vec![false; AMR_LEVELS])
            .with_patch_edges(vec![true, true, true, false, false, false, false]);

        Figure::new("Surface", 0).with_axes(
            self.domain_axes("Surface")
                .with_item(surface)
                .with_item(self.land_item())
                .with_decoration(AxesDecoration::Domain),
        )
    }

    fn speed_figure(&self) -> Figure {
        let speed = PlotItem::color_grid("speed", DerivedField::Speed)
            .with_display(self.settings.speed_bounds())
            .with_colormap(colormap::speed())
            .with_colorbar(Some("Current (m/s)"))
            .with_cell_edges(vec![false; AMR_LEVELS])
            .with_patch_edges(vec![true, true, true, false, false, false, false]);

        Figure::new("Speed", 1).with_axes(
            self.domain_axes("Currents")
                .with_item(speed)
                .with_item(self.land_item())
                .with_decoration(AxesDecoration::Domain),
        )
    }

    /// Side-by-side x and y components on a diverging colormap
    fn component_figure(
        &self,
        name: &str,
        number: u32,
        quantity: &str,
        selectors: [FieldSelector; 2],
        display: Bounds,
    ) -> Figure {
        let mut figure = Figure::new(name, number)
            .with_size(self.settings.component_figure_size)
            .hidden();

        for (k, (component, selector)) in ["X", "Y"].into_iter().zip(selectors).enumerate() {
            let name = format!("{}_{}", quantity.to_lowercase(), component.to_lowercase());
            let item = PlotItem::color_grid(name, selector)
                .with_display(display)
                .with_colormap(colormap::red_white_blue())
                .with_colorbar(None)
                .with_cell_edges(vec![false; 3])
                .with_patch_edges(vec![false; 3]);

            figure = figure.with_axes(
                self.domain_axes(&format!("{}, {}-Component", quantity, component))
                    .with_layout(AxesLayout::subplot(1, 2, k as u32 + 1))
                    .with_item(item)
                    .with_item(self.land_item())
                    .with_decoration(AxesDecoration::Domain),
            );
        }

        figure
    }

    fn topography_figure(&self, number: u32) -> Figure {
        let (min, max) = self.settings.topography_range;
        let topo = PlotItem::color_grid("topography", DerivedField::Topography)
            .with_display(Bounds::explicit(min, max))
            .with_colormap(colormap::topography())
            .with_colorbar(None)
            .with_cell_edges(vec![false; 3])
            .with_patch_edges(vec![false; 3]);

        Figure::new("Topography", number)
            .hidden()
            .with_axes(self.domain_axes("Topography").with_item(topo))
    }

    fn slice_figure(
        &self,
        name: &str,
        number: u32,
        title: &str,
        field: SliceField,
        selector: usize,
        bounds: Bounds,
    ) -> Figure {
        let slice = SliceSpec::new(field, self.settings.slice_index);
        let item = PlotItem::slice(name, slice, selector, "k-o");
        let y_bounds = bounds.as_pair().unwrap_or((-1.0, 1.0));

        Figure::new(name, number).with_axes(
            AxisGroup::new(title)
                .with_limits(self.meta.x_bounds(), bounds)
                .with_item(item)
                .with_decoration(AxesDecoration::Slice { y_bounds }),
        )
    }
}

/// Time series figure drawn once per gauge
fn gauge_figure(
    name: &str,
    number: u32,
    title: &str,
    selector: usize,
    ylabel: &str,
    time_bounds: Bounds,
) -> Figure {
    Figure::each_gauge(name, number).with_axes(
        AxisGroup::new(title)
            .with_limits(time_bounds, Bounds::Automatic)
            .with_item(PlotItem::line(title.to_lowercase().replace(' ', "_"), selector, "b-"))
            .with_decoration(AxesDecoration::Gauge {
                ylabel: ylabel.to_string(),
            }),
    )
}
