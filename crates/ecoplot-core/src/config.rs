//! Simulator configuration document.
//!
//! The simulator is driven by a JSON document that ecoplot passes through
//! untouched. Only the `populations` array is read here, and from each
//! entry only `name` and `color`. Every other field belongs to the
//! simulator and is ignored.
//!
//! ```json
//! {
//!   "width": 400,
//!   "populations": [
//!     { "name": "rabbits", "color": "'ffffff'", "initial": 400 },
//!     { "name": "foxes", "color": "'ff0000'", "initial": 20 }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use ecoplot_types::{ColorMap, PopulationSpec};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse the JSON document.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },

    /// Two populations share a name, so their series could not be told apart.
    #[error("population {name:?} is declared more than once")]
    DuplicatePopulation {
        /// The repeated name.
        name: String,
    },

    /// A population has an empty name.
    #[error("population at index {index} has an empty name")]
    EmptyName {
        /// Position of the entry in the `populations` array.
        index: usize,
    },
}

/// The parts of the simulator configuration that ecoplot consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulatorConfig {
    /// Tracked populations in declaration order.
    #[serde(default)]
    pub populations: Vec<PopulationSpec>,
}

impl SimulatorConfig {
    /// Load and validate configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Json`] if the content is not a valid document, or a
    /// validation error if population names are empty or repeated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for (index, spec) in self.populations.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicatePopulation {
                    name: spec.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The set of population names the aggregator accepts.
    pub fn known_names(&self) -> BTreeSet<String> {
        self.populations.iter().map(|p| p.name.clone()).collect()
    }

    /// Normalized display colors keyed by population name.
    pub fn color_map(&self) -> ColorMap {
        ColorMap::from_specs(&self.populations)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_names_and_colors_only() {
        let json = r#"{
            "width": 400,
            "height": 300,
            "populations": [
                {"name": "rabbits", "color": "'ffffff'", "initial": 400, "max": 10000},
                {"name": "foxes", "color": "'#ff0000'", "initial": 20}
            ]
        }"#;
        let config = SimulatorConfig::parse(json).unwrap();
        assert_eq!(
            config.populations,
            vec![
                PopulationSpec::new("rabbits", "'ffffff'"),
                PopulationSpec::new("foxes", "'#ff0000'"),
            ]
        );

        let names: Vec<String> = config.known_names().into_iter().collect();
        assert_eq!(names, vec!["foxes".to_owned(), "rabbits".to_owned()]);

        let colors = config.color_map();
        assert_eq!(colors.get("rabbits"), Some("#ffffff"));
        assert_eq!(colors.get("foxes"), Some("#ff0000"));
    }

    #[test]
    fn missing_populations_is_empty() {
        let config = SimulatorConfig::parse(r#"{"steps": 100}"#).unwrap();
        assert!(config.populations.is_empty());
        assert!(config.known_names().is_empty());
    }

    #[test]
    fn duplicate_names_rejected() {
        let json = r#"{"populations": [
            {"name": "foxes", "color": "ff0000"},
            {"name": "foxes", "color": "00ff00"}
        ]}"#;
        let err = SimulatorConfig::parse(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePopulation { ref name } if name == "foxes"));
    }

    #[test]
    fn empty_name_rejected() {
        let json = r#"{"populations": [
            {"name": "rabbits", "color": "ffffff"},
            {"name": "", "color": "00ff00"}
        ]}"#;
        let err = SimulatorConfig::parse(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyName { index: 1 }));
    }

    #[test]
    fn missing_color_is_a_json_error() {
        let err = SimulatorConfig::parse(r#"{"populations": [{"name": "rabbits"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn from_file_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foxes_and_rabbits.json");
        std::fs::write(
            &path,
            r#"{"populations": [{"name": "rabbits", "color": "ffffff"}]}"#,
        )
        .unwrap();
        let config = SimulatorConfig::from_file(&path).unwrap();
        assert_eq!(config.populations.len(), 1);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimulatorConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
