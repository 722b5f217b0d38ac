//! Folding the snapshot stream into per-population time series.
//!
//! The [`Aggregator`] owns the growing [`TimeSeries`] for the duration of a
//! single forward pass. Each line is either noise (no time marker, state
//! untouched) or a snapshot, which always appends one step. Snapshots are
//! validated in full before anything is appended, so a rejected line never
//! leaves a half-written step behind.
//!
//! Populations a snapshot does not mention receive `None` for that step.
//! This keeps every series the same length as `steps`.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

use ecoplot_types::{SnapshotRecord, TimeSeries};
use tracing::{debug, info, trace};

use crate::protocol::{ProtocolError, parse_snapshot};

/// Errors that abort an aggregation pass.
///
/// Every variant carries the 1-based line number and, where a line was
/// read, the line itself verbatim.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// A snapshot named a population that is not in the configuration.
    #[error("line {line_number}: unknown population {name:?} in: {line}")]
    UnknownPopulation {
        /// The undeclared population name.
        name: String,
        /// 1-based position of the line in the stream.
        line_number: u64,
        /// The offending line.
        line: String,
    },

    /// A snapshot reported the same population more than once.
    #[error("line {line_number}: population {name:?} reported twice in: {line}")]
    DuplicatePopulation {
        /// The repeated population name.
        name: String,
        /// 1-based position of the line in the stream.
        line_number: u64,
        /// The offending line.
        line: String,
    },

    /// A recognized numeric token could not be converted.
    #[error("line {line_number}: malformed record ({source}) in: {line}")]
    MalformedRecord {
        /// 1-based position of the line in the stream.
        line_number: u64,
        /// The offending line.
        line: String,
        /// The recognizer error.
        source: ProtocolError,
    },

    /// The line source failed before the stream ended.
    #[error("line {line_number}: failed to read from stream: {source}")]
    Stream {
        /// 1-based position of the line that could not be read.
        line_number: u64,
        /// The underlying source error.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl AggregateError {
    /// Whether the stream disagreed with the configured populations.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownPopulation { .. } | Self::DuplicatePopulation { .. }
        )
    }
}

/// What a single line contributed to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line had no time marker and was ignored.
    Skipped,
    /// The line was a snapshot and appended one step.
    Snapshot {
        /// The step that was appended.
        time_step: u64,
        /// Number of populations the line reported.
        populations: usize,
    },
}

/// Stateful fold over snapshot lines.
#[derive(Debug, Clone)]
pub struct Aggregator {
    series: TimeSeries,
    lines_read: u64,
    lines_skipped: u64,
    last_progress_decile: Option<u64>,
}

impl Aggregator {
    /// Create an aggregator with an empty series for every known name.
    pub fn new<I, S>(known_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            series: TimeSeries::with_populations(known_names),
            lines_read: 0,
            lines_skipped: 0,
            last_progress_decile: None,
        }
    }

    /// Fold one line into the aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::UnknownPopulation`] or
    /// [`AggregateError::DuplicatePopulation`] when the payload disagrees
    /// with the configured populations, and
    /// [`AggregateError::MalformedRecord`] when a numeric token is out of
    /// range. The aggregate is unchanged on error.
    pub fn push_line(&mut self, line: &str) -> Result<LineOutcome, AggregateError> {
        self.lines_read = self.lines_read.saturating_add(1);
        let line_number = self.lines_read;

        let record = match parse_snapshot(line) {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.lines_skipped = self.lines_skipped.saturating_add(1);
                trace!(line_number, "no time marker, line skipped");
                return Ok(LineOutcome::Skipped);
            }
            Err(source) => {
                return Err(AggregateError::MalformedRecord {
                    line_number,
                    line: line.to_owned(),
                    source,
                });
            }
        };

        let counts = self.validate(&record, line, line_number)?;
        self.series.record(record.time_step, &counts);
        trace!(
            line_number,
            time_step = record.time_step,
            populations = counts.len(),
            "snapshot recorded"
        );
        self.log_progress(&record);

        Ok(LineOutcome::Snapshot {
            time_step: record.time_step,
            populations: counts.len(),
        })
    }

    /// Check every reported name before the record touches the aggregate.
    fn validate<'r>(
        &self,
        record: &'r SnapshotRecord,
        line: &str,
        line_number: u64,
    ) -> Result<BTreeMap<&'r str, u64>, AggregateError> {
        let mut counts = BTreeMap::new();
        for (name, count) in &record.counts {
            if !self.series.contains(name) {
                return Err(AggregateError::UnknownPopulation {
                    name: name.clone(),
                    line_number,
                    line: line.to_owned(),
                });
            }
            if counts.insert(name.as_str(), *count).is_some() {
                return Err(AggregateError::DuplicatePopulation {
                    name: name.clone(),
                    line_number,
                    line: line.to_owned(),
                });
            }
        }
        Ok(counts)
    }

    fn log_progress(&mut self, record: &SnapshotRecord) {
        let Some(total) = record.total_steps else {
            return;
        };
        let Some(decile) = record.time_step.saturating_mul(10).checked_div(total) else {
            return;
        };
        if self.last_progress_decile != Some(decile) {
            self.last_progress_decile = Some(decile);
            debug!(
                time_step = record.time_step,
                total_steps = total,
                percent = decile.saturating_mul(10).min(100),
                "simulation progress"
            );
        }
    }

    /// Number of lines pushed so far.
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Number of lines ignored for lacking a time marker.
    pub const fn lines_skipped(&self) -> u64 {
        self.lines_skipped
    }

    /// The aggregate built so far.
    pub const fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Finish the pass and hand out the aggregate.
    pub fn finish(self) -> TimeSeries {
        info!(
            lines_read = self.lines_read,
            lines_skipped = self.lines_skipped,
            steps = self.series.len(),
            populations = self.series.series.len(),
            "aggregation complete"
        );
        self.series
    }
}

/// Consume a fallible line stream to completion and return the aggregate.
///
/// Blocks on the stream between lines. The first error aborts the pass;
/// no partial aggregate is returned.
///
/// # Errors
///
/// Returns [`AggregateError::Stream`] when the source yields an error, and
/// any error of [`Aggregator::push_line`].
pub fn aggregate<I, L, E>(lines: I, known_names: &BTreeSet<String>) -> Result<TimeSeries, AggregateError>
where
    I: IntoIterator<Item = Result<L, E>>,
    L: AsRef<str>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut aggregator = Aggregator::new(known_names);
    for line in lines {
        let line = line.map_err(|source| AggregateError::Stream {
            line_number: aggregator.lines_read().saturating_add(1),
            source: Box::new(source),
        })?;
        aggregator.push_line(line.as_ref())?;
    }
    Ok(aggregator.finish())
}

/// [`aggregate`] for sources that cannot fail, such as in-memory text.
pub fn aggregate_lines<I>(lines: I, known_names: &BTreeSet<String>) -> Result<TimeSeries, AggregateError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    aggregate(lines.into_iter().map(Ok::<_, Infallible>), known_names)
}
