//! Shared type definitions for ecoplot.
//!
//! Every crate in the workspace speaks in these types: the configuration
//! loader produces [`PopulationSpec`]s and a [`ColorMap`], the protocol
//! recognizer produces [`SnapshotRecord`]s, the aggregator folds them into
//! a [`TimeSeries`], and the renderer consumes the finished series.
//!
//! # Modules
//!
//! - [`population`] -- Configured populations and their display colors
//! - [`series`] -- Per-line snapshot records and the aggregated time series

pub mod population;
pub mod series;

// Re-export all public types at crate root for convenience.
pub use population::{ColorMap, PopulationSpec, normalize_color};
pub use series::{SnapshotRecord, TimeSeries};
