//! Snapshot records and the aggregated population time series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single time snapshot extracted from one line of simulator output.
///
/// Constructed transiently per matching line and folded into a
/// [`TimeSeries`] immediately afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Time step from the `Time <step>` marker.
    pub time_step: u64,
    /// Declared run length from a `Time <step>/<total>` marker, if present.
    ///
    /// Informational only: it never affects the aggregate.
    pub total_steps: Option<u64>,
    /// `(population, count)` pairs in payload order.
    pub counts: Vec<(String, u64)>,
}

/// Per-population series reconstructed from the snapshot stream.
///
/// Every series is aligned with `steps`: entry `i` of a series is the
/// population count at `steps[i]`, or `None` when that snapshot did not
/// mention the population.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Time steps in arrival order.
    pub steps: Vec<u64>,
    /// Population name to aligned counts.
    pub series: BTreeMap<String, Vec<Option<u64>>>,
}

impl TimeSeries {
    /// Create an empty aggregate with one (empty) series per name.
    pub fn with_populations<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: Vec::new(),
            series: names.into_iter().map(|name| (name.into(), Vec::new())).collect(),
        }
    }

    /// Append one step, pushing `counts[name]` (or `None`) onto every series.
    ///
    /// Names in `counts` that have no series are ignored; callers validate
    /// names before recording.
    pub fn record(&mut self, time_step: u64, counts: &BTreeMap<&str, u64>) {
        self.steps.push(time_step);
        for (name, values) in &mut self.series {
            values.push(counts.get(name.as_str()).copied());
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether a series exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// The aligned counts for one population.
    pub fn get(&self, name: &str) -> Option<&[Option<u64>]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Population names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Largest count recorded for any population.
    pub fn max_count(&self) -> Option<u64> {
        self.series.values().flatten().flatten().copied().max()
    }

    /// Smallest and largest recorded time step.
    pub fn step_range(&self) -> Option<(u64, u64)> {
        let min = self.steps.iter().copied().min()?;
        let max = self.steps.iter().copied().max()?;
        Some((min, max))
    }
}
