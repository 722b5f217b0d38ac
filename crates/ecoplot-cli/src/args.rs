//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Suffix appended to the config file stem to name the chart.
const PLOT_SUFFIX: &str = "_plot.png";

/// Run the ecosystem simulator and chart its population sizes over time.
#[derive(Parser, Debug)]
#[command(name = "ecoplot", version)]
pub struct Cli {
    /// JSON configuration file describing simulation parameters
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Simulator executable, run with CONFIG as its only argument
    #[arg(short, long, env = "ECOPLOT_SIMULATOR", default_value = "./ecosystem")]
    pub simulator: PathBuf,

    /// Chart path (defaults to <config stem>_plot.png in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the aggregated series as JSON
    #[arg(long, value_name = "PATH")]
    pub series_json: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, env = "ECOPLOT_CHART_WIDTH", default_value = "1200")]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, env = "ECOPLOT_CHART_HEIGHT", default_value = "720")]
    pub height: u32,
}

impl Cli {
    /// Where the chart goes.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.config))
    }
}

/// `<stem>_plot.png` in the current directory, for a config at any path.
pub fn default_output_path(config: &Path) -> PathBuf {
    let stem = config
        .file_stem()
        .map_or_else(|| "ecoplot".into(), |s| s.to_string_lossy());
    PathBuf::from(format!("{stem}{PLOT_SUFFIX}"))
}
