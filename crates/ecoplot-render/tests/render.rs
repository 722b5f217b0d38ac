//! End-to-end chart rendering.
//!
//! Text rasterisation needs a system `sans-serif` font, which minimal CI
//! images lack, so these tests are `#[ignore]`d. Run with:
//!
//! ```bash
//! cargo test -p ecoplot-render -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use ecoplot_render::{ChartOptions, RenderError, render_chart};
use ecoplot_types::{ColorMap, PopulationSpec, TimeSeries};

fn predator_prey() -> (TimeSeries, ColorMap) {
    let mut series = TimeSeries::with_populations(["rabbits", "foxes"]);
    for (step, rabbits, foxes) in [(0, 400, 20), (1, 431, 19), (2, 455, 22), (3, 402, 31)] {
        let counts: BTreeMap<&str, u64> = [("rabbits", rabbits), ("foxes", foxes)].into_iter().collect();
        series.record(step, &counts);
    }
    // A step without foxes leaves a gap in their line.
    series.record(4, &[("rabbits", 350)].into_iter().collect());

    let colors = ColorMap::from_specs(&[
        PopulationSpec::new("rabbits", "'ffffff'"),
        PopulationSpec::new("foxes", "'ff0000'"),
    ]);
    (series, colors)
}

#[test]
#[ignore = "requires a system sans-serif font"]
fn writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foxes_and_rabbits_plot.png");
    let (series, colors) = predator_prey();

    render_chart(&path, &series, &colors, &ChartOptions::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
#[ignore = "requires a system sans-serif font"]
fn writes_empty_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_plot.png");
    let options = ChartOptions {
        width: 320,
        height: 200,
        ..ChartOptions::default()
    };

    render_chart(&path, &TimeSeries::with_populations(["rabbits"]), &ColorMap::default(), &options)
        .unwrap();
    assert!(path.exists());
}

#[test]
fn invalid_color_fails_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_plot.png");
    let (series, _) = predator_prey();
    let colors = ColorMap::from_specs(&[
        PopulationSpec::new("rabbits", "'ffffff'"),
        PopulationSpec::new("foxes", "'not-a-color'"),
    ]);

    let err = render_chart(&path, &series, &colors, &ChartOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidColor { .. }));
    assert!(!path.exists());
}
