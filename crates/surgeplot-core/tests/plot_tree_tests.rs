//! Plot tree construction tests

mod common;

use common::fixtures::{domain, timed_domain};
use rstest::rstest;
use surgeplot_core::{
    build_plot_tree, AxesDecoration, Bounds, DerivedField, FieldSelector, FigureKind, PlotKind,
    PlotSettings, PlotTree,
};

fn default_tree() -> PlotTree {
    build_plot_tree(&domain(), &PlotSettings::default()).unwrap()
}

// === Figure Set ===

#[test]
fn test_scenario_domain_without_time_bounds() {
    let tree = default_tree();

    let names: Vec<&str> = tree.figures().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Surface",
            "Speed",
            "Velocity Components - Entire Domain",
            "Momentum Components - Entire Domain",
            "Topography",
            "Slice eta, y=0",
            "Slice u, y=0",
            "Slice hu, y=0",
            "Gauge Surface",
            "Gauge X-Momentum",
            "Gauge Y-Momentum",
        ]
    );

    // Every scaled domain axes spans exactly the domain
    for figure in tree.frame_figures() {
        for axes in figure.axes.iter().filter(|a| a.scaled) {
            assert_eq!(axes.xlimits, Bounds::explicit(-100e3, 100e3), "{}", axes.title);
            assert_eq!(axes.ylimits, Bounds::explicit(-50e3, 50e3), "{}", axes.title);
        }
    }

    for figure in tree.gauge_figures() {
        assert_eq!(figure.axes[0].xlimits, Bounds::Automatic);
    }
}

#[test]
fn test_gauge_extent_follows_time_range() {
    let tree = build_plot_tree(&timed_domain(), &PlotSettings::default()).unwrap();
    let gauge_figures: Vec<_> = tree.gauge_figures().collect();
    assert_eq!(gauge_figures.len(), 3);
    for figure in gauge_figures {
        assert_eq!(figure.kind, FigureKind::EachGauge);
        assert_eq!(
            figure.axes[0].xlimits,
            Bounds::explicit(-2.0 * 86_400.0, 86_400.0)
        );
        assert_eq!(figure.axes[0].ylimits, Bounds::Automatic);
    }
}

#[test]
fn test_gauge_extent_with_partial_time_range() {
    let mut meta = domain();
    meta.t0 = Some(0.0);
    let tree = build_plot_tree(&meta, &PlotSettings::default()).unwrap();
    assert!(tree.gauge_figures().all(|f| f.axes[0].xlimits.is_automatic()));
}

#[rstest]
#[case(0, "Surface")]
#[case(1, "Speed")]
#[case(2, "Velocity Components - Entire Domain")]
#[case(3, "Momentum Components - Entire Domain")]
#[case(300, "Gauge Surface")]
#[case(301, "Gauge X-Momentum")]
#[case(302, "Gauge Y-Momentum")]
fn test_explicit_figure_numbers(#[case] number: u32, #[case] name: &str) {
    let tree = default_tree();
    assert_eq!(tree.figure(number).map(|f| f.name.as_str()), Some(name));
}

#[test]
fn test_auto_numbers_unique_and_above_explicit() {
    let tree = default_tree();
    let mut numbers: Vec<u32> = tree.figures().iter().map(|f| f.number).collect();
    let topo = tree.figure_by_name("Topography").unwrap().number;
    assert!(topo > 302);
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), tree.len());
}

// === Display Ranges ===

#[test]
fn test_scenario_component_display_ranges() {
    let settings = PlotSettings {
        speed_max: 0.01,
        ..Default::default()
    };
    let tree = build_plot_tree(&domain(), &settings).unwrap();

    let velocity = tree.figure_by_name("Velocity Components - Entire Domain").unwrap();
    for axes in &velocity.axes {
        assert_eq!(axes.items[0].display, Bounds::explicit(-0.01, 0.01));
    }

    let momentum = tree.figure_by_name("Momentum Components - Entire Domain").unwrap();
    for axes in &momentum.axes {
        assert_eq!(axes.items[0].display, Bounds::explicit(-1.0, 1.0));
    }
}

#[test]
fn test_component_selectors() {
    let tree = default_tree();
    let velocity = tree.figure(2).unwrap();
    assert_eq!(
        velocity.axes[0].items[0].selector,
        FieldSelector::Derived(DerivedField::XVelocity)
    );
    assert_eq!(
        velocity.axes[1].items[0].selector,
        FieldSelector::Derived(DerivedField::YVelocity)
    );

    let momentum = tree.figure(3).unwrap();
    assert_eq!(momentum.axes[0].items[0].selector, FieldSelector::Index(1));
    assert_eq!(momentum.axes[1].items[0].selector, FieldSelector::Index(2));
}

#[test]
fn test_surface_figure_layers() {
    let tree = default_tree();
    let axes = &tree.figure(0).unwrap().axes[0];

    let surface = axes.item("surface").unwrap();
    assert_eq!(surface.display, Bounds::explicit(-0.01, 0.01));
    assert!(surface.add_colorbar);
    assert_eq!(surface.colorbar_label.as_deref(), Some("Surface Height (m)"));
    assert_eq!(surface.patch_edges[..3], [true, true, true]);

    let land = axes.item("land").unwrap();
    assert_eq!(land.display, Bounds::explicit(0.0, 50.0));
    assert!(!land.add_colorbar);

    assert_eq!(axes.after_axes, Some(AxesDecoration::Domain));
}

#[test]
fn test_slice_figures_share_column() {
    let settings = PlotSettings {
        slice_index: 7,
        ..Default::default()
    };
    let tree = build_plot_tree(&domain(), &settings).unwrap();

    for name in ["Slice eta, y=0", "Slice u, y=0", "Slice hu, y=0"] {
        let figure = tree.figure_by_name(name).unwrap();
        assert!(figure.show);
        let axes = &figure.axes[0];
        match axes.items[0].kind {
            PlotKind::Slice { slice } => assert_eq!(slice.index, 7),
            other => panic!("{} is not a slice: {:?}", name, other),
        }
        assert!(matches!(axes.after_axes, Some(AxesDecoration::Slice { .. })));
        assert!(!axes.ylimits.is_automatic());
    }
}

#[test]
fn test_gauge_ylabels() {
    let tree = default_tree();
    let labels: Vec<String> = tree
        .gauge_figures()
        .filter_map(|f| match &f.axes[0].after_axes {
            Some(AxesDecoration::Gauge { ylabel }) => Some(ylabel.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec!["Surface Height (m)", "X-Momentum (m^2/s)", "Y-Momentum (m^2/s)"]
    );
}

// === Purity ===

#[test]
fn test_build_is_deterministic() {
    let settings = PlotSettings::default();
    let a = build_plot_tree(&timed_domain(), &settings).unwrap();
    let b = build_plot_tree(&timed_domain(), &settings).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn test_tree_json_roundtrip() {
    let tree = default_tree();
    let json = tree.to_json().unwrap();
    let back: PlotTree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_invalid_settings_fail_before_build() {
    let settings = PlotSettings {
        land_range: (50.0, 0.0),
        ..Default::default()
    };
    let err = build_plot_tree(&domain(), &settings).unwrap_err();
    assert!(err.to_string().contains("land_range"));
}
