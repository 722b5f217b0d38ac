//! Chart rendering for finished population time series.
//!
//! A pure sink: takes a [`TimeSeries`] and a [`ColorMap`] and writes a PNG
//! line chart. Nothing here feeds back into parsing.
//!
//! [`TimeSeries`]: ecoplot_types::TimeSeries
//! [`ColorMap`]: ecoplot_types::ColorMap

mod chart;
mod color;
mod error;

pub use chart::{ChartOptions, render_chart, segments};
pub use color::{check_colors, parse_hex_color};
pub use error::RenderError;
