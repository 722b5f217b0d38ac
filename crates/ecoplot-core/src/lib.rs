//! Snapshot stream parsing and population time-series aggregation.
//!
//! This crate owns the part of ecoplot with real design weight: turning an
//! unbounded stream of simulator log lines into aligned per-population
//! series, one forward pass, no buffering.
//!
//! # Modules
//!
//! - [`config`] -- Loading the simulator's JSON configuration document
//!   (population names and colors only).
//! - [`protocol`] -- The three-stage line recognizer: time marker, brace
//!   span, `"name": count` pairs.
//! - [`aggregate`] -- The [`Aggregator`] fold and the [`aggregate`]
//!   entry point over a line stream.
//!
//! # Pipeline
//!
//! ```text
//! line --> find_time_marker --> find_brace_span --> scan_pairs --> Aggregator
//! ```
//!
//! [`Aggregator`]: aggregate::Aggregator
//! [`aggregate`]: aggregate::aggregate

pub mod aggregate;
pub mod config;
pub mod protocol;

pub use aggregate::{AggregateError, Aggregator, LineOutcome, aggregate, aggregate_lines};
pub use config::{ConfigError, SimulatorConfig};
pub use protocol::{ProtocolError, TimeMarker, parse_snapshot};
