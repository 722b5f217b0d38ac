//! ecoplot binary: run the ecosystem simulator and chart its populations.
//!
//! Wires the pipeline together in a single blocking pass:
//!
//! ```text
//! config.json --> simulator --> LineStream --> aggregate --> render_chart --> <stem>_plot.png
//! ```
//!
//! # Run Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load the simulator configuration and derive names and colors
//! 3. Launch the simulator with the configuration path
//! 4. Aggregate its output until the stream ends
//! 5. Collect the exit status (non-zero is a warning)
//! 6. Optionally dump the series as JSON
//! 7. Render the chart

mod args;
mod error;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use ecoplot_core::SimulatorConfig;
use ecoplot_driver::LineStream;
use ecoplot_render::ChartOptions;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::args::Cli;
use crate::error::CliError;

/// Application entry point.
///
/// Parses arguments, initializes logging and runs the pipeline. Any fatal
/// error is logged with its full message and turned into exit code 1.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ecoplot failed");
            ExitCode::FAILURE
        }
    }
}

/// Execute one simulator run and chart it.
fn run(cli: &Cli) -> Result<(), CliError> {
    info!(config = %cli.config.display(), "ecoplot starting");

    // 2. Load configuration.
    let config = SimulatorConfig::from_file(&cli.config)?;
    let known_names = config.known_names();
    let colors = config.color_map();
    ecoplot_render::check_colors(&colors)?;
    info!(
        populations = known_names.len(),
        names = ?known_names,
        "Configuration loaded"
    );

    // 3. Launch the simulator.
    let mut stream = LineStream::start(&cli.simulator, &cli.config)?;

    // 4. Aggregate until the simulator closes its output.
    let series = match ecoplot_core::aggregate(&mut stream, &known_names) {
        Ok(series) => series,
        Err(e) => {
            stream.terminate();
            return Err(e.into());
        }
    };

    // 5. Collect the exit status. A failed simulator still charts what it printed.
    let exit = stream.finish()?;
    info!(
        success = exit.success,
        code = ?exit.code,
        steps = series.len(),
        "Simulation output consumed"
    );

    // 6. Dump the series.
    if let Some(path) = &cli.series_json {
        let json = serde_json::to_string_pretty(&series)?;
        std::fs::write(path, json).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Series written");
    }

    // 7. Render the chart.
    let output = cli.output_path();
    let options = ChartOptions {
        width: cli.width,
        height: cli.height,
        ..ChartOptions::default()
    };
    ecoplot_render::render_chart(&output, &series, &colors, &options)?;

    info!(output = %output.display(), "ecoplot finished");
    Ok(())
}
