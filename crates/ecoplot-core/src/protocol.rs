//! Line protocol recognizer for simulator output.
//!
//! The simulator writes free-form text. A line carries a snapshot when it
//! contains a time marker, and its population counts live in the first
//! brace-delimited span of the same line:
//!
//! ```text
//! Time 42/500: Population sizes: { "rabbits": 120 | "foxes": 8 }
//! ^^^^^^^^^^^                    ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! time marker                    brace span -> "name": count pairs
//! ```
//!
//! Each stage is a pure function over `&str` so it can be tested on its
//! own. [`parse_snapshot`] composes them.

use std::num::ParseIntError;

use ecoplot_types::SnapshotRecord;

/// The literal that opens a time marker.
const TIME_TAG: &str = "Time ";

/// Errors raised by the recognizer.
///
/// Only numeric conversion can fail: everything that does not match the
/// protocol is skipped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A recognized digit run does not fit in a `u64`.
    #[error("numeric token {token:?} is out of range: {source}")]
    Malformed {
        /// The offending digit run.
        token: String,
        /// The underlying integer parse error.
        source: ParseIntError,
    },
}

/// A parsed `Time <step>[/<total>]` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMarker {
    /// The current time step.
    pub step: u64,
    /// The declared number of steps, when the simulator prints one.
    pub total: Option<u64>,
}

/// Find the first time marker in a line.
///
/// Matches `Time ` followed by at least one ASCII digit anywhere in the
/// line. An immediately following `/<digits>` is captured as the total.
/// Occurrences of `Time ` without digits are passed over.
pub fn find_time_marker(line: &str) -> Result<Option<TimeMarker>, ProtocolError> {
    for (idx, _) in line.match_indices(TIME_TAG) {
        let Some(after) = line.get(idx..).and_then(|s| s.strip_prefix(TIME_TAG)) else {
            continue;
        };
        let (digits, tail) = split_digits(after);
        if digits.is_empty() {
            continue;
        }
        let step = parse_number(digits)?;
        // The total is display-only; an unparseable one is simply absent.
        let total = tail
            .strip_prefix('/')
            .map(|t| split_digits(t).0)
            .and_then(|d| d.parse().ok());
        return Ok(Some(TimeMarker { step, total }));
    }
    Ok(None)
}

/// The text between the first `{` of a line and the first `}` after it.
pub fn find_brace_span(line: &str) -> Option<&str> {
    let (_, after_open) = line.split_once('{')?;
    let (inner, _) = after_open.split_once('}')?;
    Some(inner)
}

/// Extract every `"name": count` pair from a payload span.
///
/// The name is a non-empty run of non-quote characters and the colon must
/// follow its closing quote directly; whitespace is allowed between the
/// colon and the digits. Text that does not form a pair is ignored.
pub fn scan_pairs(span: &str) -> Result<Vec<(String, u64)>, ProtocolError> {
    let mut pairs = Vec::new();
    let mut rest = span;

    while let Some((_, after_open)) = rest.split_once('"') {
        let Some((name, after_close)) = after_open.split_once('"') else {
            break;
        };
        match pair_count(name, after_close)? {
            Some((count, tail)) => {
                pairs.push((name.to_owned(), count));
                rest = tail;
            }
            // The closing quote may open the next name.
            None => rest = after_open.get(name.len()..).unwrap_or_default(),
        }
    }

    Ok(pairs)
}

/// Parse one line into a snapshot record.
///
/// Returns `Ok(None)` for lines without a time marker; their payload is
/// never examined. A marker without a brace span yields a record with no
/// counts.
pub fn parse_snapshot(line: &str) -> Result<Option<SnapshotRecord>, ProtocolError> {
    let Some(marker) = find_time_marker(line)? else {
        return Ok(None);
    };
    let counts = match find_brace_span(line) {
        Some(span) => scan_pairs(span)?,
        None => Vec::new(),
    };
    Ok(Some(SnapshotRecord {
        time_step: marker.step,
        total_steps: marker.total,
        counts,
    }))
}

/// Match `:<ws>*<digits>` after a quoted name, returning the count and the
/// remaining text.
fn pair_count<'a>(name: &str, after_close: &'a str) -> Result<Option<(u64, &'a str)>, ProtocolError> {
    if name.is_empty() {
        return Ok(None);
    }
    let Some(value) = after_close.strip_prefix(':') else {
        return Ok(None);
    };
    let (digits, tail) = split_digits(value.trim_start());
    if digits.is_empty() {
        return Ok(None);
    }
    Ok(Some((parse_number(digits)?, tail)))
}

/// Split a string into its leading ASCII digit run and the rest.
fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_number(digits: &str) -> Result<u64, ProtocolError> {
    digits.parse().map_err(|source| ProtocolError::Malformed {
        token: digits.to_owned(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, u64)]) -> Vec<(String, u64)> {
        list.iter().map(|(n, c)| ((*n).to_owned(), *c)).collect()
    }

    // --- time marker ---

    #[test]
    fn marker_with_total() {
        let marker = find_time_marker("Time 42/500: {}").unwrap().unwrap();
        assert_eq!(marker, TimeMarker { step: 42, total: Some(500) });
    }

    #[test]
    fn marker_without_total() {
        let marker = find_time_marker("Time 7: Population sizes: { }").unwrap().unwrap();
        assert_eq!(marker, TimeMarker { step: 7, total: None });
    }

    #[test]
    fn marker_anywhere_in_line() {
        let marker = find_time_marker("[sim] Time 3/9 done").unwrap().unwrap();
        assert_eq!(marker.step, 3);
        assert_eq!(marker.total, Some(9));
    }

    #[test]
    fn marker_needs_digits() {
        assert_eq!(find_time_marker("Time is running out").unwrap(), None);
        assert_eq!(find_time_marker("Time: 5").unwrap(), None);
        assert_eq!(find_time_marker("noise line, ignored").unwrap(), None);
        assert_eq!(find_time_marker("").unwrap(), None);
    }

    #[test]
    fn marker_skips_occurrences_without_digits() {
        let marker = find_time_marker("Time flies. Time 12: {}").unwrap().unwrap();
        assert_eq!(marker.step, 12);
    }

    #[test]
    fn marker_slash_without_digits_has_no_total() {
        let marker = find_time_marker("Time 4/: {}").unwrap().unwrap();
        assert_eq!(marker, TimeMarker { step: 4, total: None });
    }

    #[test]
    fn marker_overflow_is_malformed() {
        let err = find_time_marker("Time 99999999999999999999999: {}").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Malformed { ref token, .. } if token == "99999999999999999999999"
        ));
    }

    // --- brace span ---

    #[test]
    fn span_is_first_braces_non_greedy() {
        assert_eq!(find_brace_span(r#"a {"x": 1} b {"y": 2}"#), Some(r#""x": 1"#));
    }

    #[test]
    fn span_missing_braces() {
        assert_eq!(find_brace_span("Time 1: nothing here"), None);
        assert_eq!(find_brace_span("Time 1: { unterminated"), None);
        assert_eq!(find_brace_span("Time 1: } backwards {"), None);
    }

    #[test]
    fn span_empty() {
        assert_eq!(find_brace_span("Time 1: {}"), Some(""));
    }

    // --- pairs ---

    #[test]
    fn pairs_with_commas() {
        let found = scan_pairs(r#""rabbits": 120, "foxes": 8"#).unwrap();
        assert_eq!(found, pairs(&[("rabbits", 120), ("foxes", 8)]));
    }

    #[test]
    fn pairs_with_pipes() {
        let found = scan_pairs(r#" "rabbit": 5 | "fox": 3 "#).unwrap();
        assert_eq!(found, pairs(&[("rabbit", 5), ("fox", 3)]));
    }

    #[test]
    fn pairs_without_space_after_colon() {
        let found = scan_pairs(r#""a":1,"b":2"#).unwrap();
        assert_eq!(found, pairs(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn pairs_ignore_unmatched_text() {
        let found = scan_pairs(r#"junk "label" "rabbits": 9 "note": "text" 4"#).unwrap();
        assert_eq!(found, pairs(&[("rabbits", 9)]));
    }

    #[test]
    fn pairs_require_colon_right_after_quote() {
        assert!(scan_pairs(r#""rabbits" : 9"#).unwrap().is_empty());
    }

    #[test]
    fn pairs_skip_empty_names() {
        let found = scan_pairs(r#""": 1, "foxes": 2"#).unwrap();
        assert_eq!(found, pairs(&[("foxes", 2)]));
    }

    #[test]
    fn pairs_unbalanced_quote() {
        let found = scan_pairs(r#""rabbits": 9, "fox"#).unwrap();
        assert_eq!(found, pairs(&[("rabbits", 9)]));
    }

    #[test]
    fn pairs_empty_span() {
        assert!(scan_pairs("").unwrap().is_empty());
        assert!(scan_pairs("   ").unwrap().is_empty());
    }

    #[test]
    fn pairs_negative_count_is_not_a_pair() {
        assert!(scan_pairs(r#""rabbits": -3"#).unwrap().is_empty());
    }

    #[test]
    fn pairs_overflow_is_malformed() {
        let err = scan_pairs(r#""rabbits": 18446744073709551616"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed { .. }));
    }

    // --- composition ---

    #[test]
    fn snapshot_full_line() {
        let record = parse_snapshot(r#"Time 42/500: {"rabbits": 120, "foxes": 8}"#)
            .unwrap()
            .unwrap();
        assert_eq!(record.time_step, 42);
        assert_eq!(record.total_steps, Some(500));
        assert_eq!(record.counts, pairs(&[("rabbits", 120), ("foxes", 8)]));
    }

    #[test]
    fn snapshot_without_payload() {
        let record = parse_snapshot("Time 3: simulation paused").unwrap().unwrap();
        assert_eq!(record.time_step, 3);
        assert!(record.counts.is_empty());
    }

    #[test]
    fn payload_ignored_without_marker() {
        assert_eq!(parse_snapshot(r#"init: {"rabbits": 10}"#).unwrap(), None);
    }

    #[test]
    fn payload_before_marker_still_counts() {
        let record = parse_snapshot(r#"{"rabbits": 10} at Time 8"#).unwrap().unwrap();
        assert_eq!(record.time_step, 8);
        assert_eq!(record.counts, pairs(&[("rabbits", 10)]));
    }
}
