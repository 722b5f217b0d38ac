//! Configured populations and their display colors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One tracked population as declared in the simulator configuration.
///
/// Names are unique across a configuration; every series lookup is keyed
/// by `name`. The raw `color` is kept as written in the document and only
/// normalized when a [`ColorMap`] is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSpec {
    /// Population name as it appears in the simulator's output.
    pub name: String,
    /// Display color, possibly wrapped in stray quote characters.
    pub color: String,
}

impl PopulationSpec {
    /// Create a spec from a name and a raw color token.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Normalize a configured color token into a `#`-prefixed string.
///
/// Every `'` and `"` character is removed, surrounding whitespace is
/// trimmed, and the result carries exactly one leading `#`.
///
/// ```
/// use ecoplot_types::normalize_color;
///
/// assert_eq!(normalize_color("'#abc123'"), "#abc123");
/// assert_eq!(normalize_color("ff0000"), "#ff0000");
/// ```
pub fn normalize_color(raw: &str) -> String {
    let unquoted: String = raw.chars().filter(|c| *c != '\'' && *c != '"').collect();
    let hex = unquoted.trim().trim_start_matches('#');
    format!("#{hex}")
}

/// Mapping from population name to its normalized display color.
///
/// Derived once at startup and passed through untouched to rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap(BTreeMap<String, String>);

impl ColorMap {
    /// Build the map from configured populations, normalizing every color.
    pub fn from_specs(specs: &[PopulationSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|spec| (spec.name.clone(), normalize_color(&spec.color)))
                .collect(),
        )
    }

    /// Look up the normalized color for a population.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of populations with a color.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, color)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, color)| (name.as_str(), color.as_str()))
    }
}
