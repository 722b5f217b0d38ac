//! Error types for the ecoplot binary.
//!
//! [`CliError`] is the top-level error type that wraps all possible
//! failure modes of a run.

/// Top-level error for the ecoplot binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `run` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ecoplot_core::ConfigError,
    },

    /// The simulator could not be run.
    #[error("simulator error: {source}")]
    Driver {
        /// The underlying driver error.
        #[from]
        source: ecoplot_driver::DriverError,
    },

    /// The simulator's output could not be aggregated.
    #[error("aggregation error: {source}")]
    Aggregate {
        /// The underlying aggregation error.
        #[from]
        source: ecoplot_core::AggregateError,
    },

    /// The chart could not be rendered.
    #[error("render error: {source}")]
    Render {
        /// The underlying render error.
        #[from]
        source: ecoplot_render::RenderError,
    },

    /// The series dump could not be serialized.
    #[error("failed to serialize series: {source}")]
    Serialize {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// The series dump could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination of the dump.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
