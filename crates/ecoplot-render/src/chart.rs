//! Population line chart.

use std::ops::Range;
use std::path::Path;

use ecoplot_types::{ColorMap, TimeSeries};
use plotters::prelude::*;
use tracing::{info, warn};

use crate::color::parse_hex_color;
use crate::error::RenderError;

/// Layout of the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Caption drawn above the plot.
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 720,
            title: "Populations Over Time".to_owned(),
        }
    }
}

/// Render `series` as a PNG line chart at `path`.
///
/// One line per population in its configured color, on a dark background
/// with a legend and a faint grid. Steps where a population was not
/// reported break its line instead of being interpolated.
///
/// # Errors
///
/// Returns [`RenderError::InvalidColor`] for an unparseable configured
/// color and [`RenderError::Drawing`] if the backend fails.
pub fn render_chart(
    path: &Path,
    series: &TimeSeries,
    colors: &ColorMap,
    options: &ChartOptions,
) -> Result<(), RenderError> {
    let styles = line_colors(series, colors)?;
    if series.is_empty() {
        warn!(path = %path.display(), "no snapshots recorded, rendering an empty chart");
    }

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&BLACK).map_err(RenderError::drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 24).into_font().color(&WHITE))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(x_range(series), y_range(series))
        .map_err(RenderError::drawing)?;

    chart
        .configure_mesh()
        .x_desc("Time Step")
        .y_desc("Population")
        .axis_style(WHITE)
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
        .bold_line_style(WHITE.mix(0.25))
        .light_line_style(WHITE.mix(0.08))
        .draw()
        .map_err(RenderError::drawing)?;

    for (name, color) in &styles {
        let Some(values) = series.get(name) else {
            continue;
        };
        let style = color.stroke_width(2);
        for segment in segments(&series.steps, values) {
            if let [point] = segment.as_slice() {
                chart
                    .draw_series(std::iter::once(Circle::new(*point, 2, color.filled())))
                    .map_err(RenderError::drawing)?;
            } else {
                chart
                    .draw_series(LineSeries::new(segment, style))
                    .map_err(RenderError::drawing)?;
            }
        }

        // Empty series that only carries the legend entry.
        let legend_color = *color;
        chart
            .draw_series(LineSeries::new(Vec::<(u64, u64)>::new(), style))
            .map_err(RenderError::drawing)?
            .label(name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x.saturating_add(20), y)], legend_color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(BLACK.mix(0.8))
        .border_style(WHITE)
        .label_font(("sans-serif", 14).into_font().color(&WHITE))
        .draw()
        .map_err(RenderError::drawing)?;

    root.present().map_err(RenderError::drawing)?;

    info!(
        path = %path.display(),
        steps = series.len(),
        populations = styles.len(),
        "chart written"
    );
    Ok(())
}

/// Split an aligned series into contiguous runs of reported points.
///
/// Each `None` ends the current run, so gaps are never bridged.
pub fn segments(steps: &[u64], values: &[Option<u64>]) -> Vec<Vec<(u64, u64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (step, value) in steps.iter().zip(values) {
        if let Some(count) = value {
            current.push((*step, *count));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Resolve the line color of every population, in series order.
fn line_colors(series: &TimeSeries, colors: &ColorMap) -> Result<Vec<(String, RGBColor)>, RenderError> {
    series
        .names()
        .enumerate()
        .map(|(index, name)| {
            let color = match colors.get(name) {
                Some(token) => parse_hex_color(token).ok_or_else(|| RenderError::InvalidColor {
                    name: name.to_owned(),
                    color: token.to_owned(),
                })?,
                None => {
                    let fallback = Palette99::pick(index).to_rgba();
                    RGBColor(fallback.0, fallback.1, fallback.2)
                }
            };
            Ok((name.to_owned(), color))
        })
        .collect()
}

fn x_range(series: &TimeSeries) -> Range<u64> {
    match series.step_range() {
        Some((min, max)) if max > min => min..max,
        Some((min, _)) => min..min.saturating_add(1),
        None => 0..1,
    }
}

fn y_range(series: &TimeSeries) -> Range<u64> {
    let max = series.max_count().unwrap_or(0);
    let headroom = max.checked_div(20).unwrap_or(0);
    0..max.saturating_add(headroom).saturating_add(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use ecoplot_types::PopulationSpec;

    use super::*;

    fn series(rows: &[(u64, &[(&str, u64)])], names: &[&str]) -> TimeSeries {
        let mut series = TimeSeries::with_populations(names.iter().copied());
        for (step, counts) in rows {
            let counts: BTreeMap<&str, u64> = counts.iter().copied().collect();
            series.record(*step, &counts);
        }
        series
    }

    #[test]
    fn segments_break_on_gaps() {
        let runs = segments(
            &[0, 1, 2, 3, 4, 5],
            &[Some(1), Some(2), None, Some(4), None, Some(6)],
        );
        assert_eq!(runs, vec![vec![(0, 1), (1, 2)], vec![(3, 4)], vec![(5, 6)]]);
    }

    #[test]
    fn segments_of_missing_series_are_empty() {
        assert!(segments(&[0, 1], &[None, None]).is_empty());
        assert!(segments(&[], &[]).is_empty());
    }

    #[test]
    fn ranges_cover_data() {
        let s = series(&[(10, &[("rabbits", 400)]), (30, &[("rabbits", 200)])], &["rabbits"]);
        assert_eq!(x_range(&s), 10..30);
        assert_eq!(y_range(&s), 0..421);
    }

    #[test]
    fn ranges_never_collapse() {
        let empty = TimeSeries::with_populations(["rabbits"]);
        assert_eq!(x_range(&empty), 0..1);
        assert_eq!(y_range(&empty), 0..1);

        let single = series(&[(7, &[])], &["rabbits"]);
        assert_eq!(x_range(&single), 7..8);
    }

    #[test]
    fn configured_colors_are_used() {
        let s = TimeSeries::with_populations(["foxes", "rabbits"]);
        let colors = ColorMap::from_specs(&[
            PopulationSpec::new("foxes", "'ff0000'"),
            PopulationSpec::new("rabbits", "#fff"),
        ]);
        let styles = line_colors(&s, &colors).unwrap();
        assert_eq!(
            styles,
            vec![
                ("foxes".to_owned(), RGBColor(255, 0, 0)),
                ("rabbits".to_owned(), RGBColor(255, 255, 255)),
            ]
        );
    }

    #[test]
    fn invalid_color_is_rejected() {
        let s = TimeSeries::with_populations(["foxes"]);
        let colors = ColorMap::from_specs(&[PopulationSpec::new("foxes", "orange")]);
        let err = line_colors(&s, &colors).unwrap_err();
        assert!(matches!(err, RenderError::InvalidColor { ref name, ref color } if name == "foxes" && color == "#orange"));
    }

    #[test]
    fn missing_color_falls_back_to_palette() {
        let s = TimeSeries::with_populations(["wolves"]);
        let styles = line_colors(&s, &ColorMap::default()).unwrap();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.first().unwrap().0, "wolves");
    }
}
