// src/config/loader.rs
//! Filter bank loading from TOML and JSON sources

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::filter_config::{ConfiguredFilter, FilterBankConfig};
use crate::error::FilterError;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed document
    #[error("configuration parse error: {0}")]
    Parse(String),

    /// File extension maps to no known format
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Two filters in one bank share a name
    #[error("duplicate filter name `{0}`")]
    DuplicateName(String),

    /// A filter description was rejected by its constructor
    #[error("filter `{name}`: {source}")]
    Filter {
        /// Name of the rejected filter
        name: String,
        /// Constructor error
        #[source]
        source: FilterError,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// On-disk formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Format for `path`, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads filter banks from a list of layered files
///
/// Files are read in order; a filter in a later file replaces the one with
/// the same name from an earlier file, new names are appended. Missing files
/// are skipped.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loader without any file layers
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader over the given layers, lowest precedence first
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
        }
    }

    /// Configured layers
    pub fn paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<FilterBankConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<FilterBankConfig, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a single file, format chosen by its extension
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FilterBankConfig, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let bank = match format {
            ConfigFormat::Toml => Self::from_toml_str(&content),
            ConfigFormat::Json => Self::from_json_str(&content),
        }
        .map_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to parse filter configuration");
            err
        })?;

        debug!(path = %path.display(), filters = bank.filters.len(), "filter configuration loaded");
        Ok(bank)
    }

    /// Read and merge every existing layer
    pub fn load(&self) -> Result<FilterBankConfig, ConfigError> {
        let mut merged = FilterBankConfig::default();

        for path in &self.config_paths {
            if !path.exists() {
                debug!(path = %path.display(), "skipping missing configuration layer");
                continue;
            }
            merge_banks(&mut merged, Self::load_file(path)?);
        }
        Ok(merged)
    }

    /// Construct every filter of `bank`, keeping declaration order
    ///
    /// Stops at the first rejected filter.
    pub fn build_all(bank: &FilterBankConfig) -> Result<Vec<(String, ConfiguredFilter)>, ConfigError> {
        let mut seen = HashSet::new();
        let mut built = Vec::with_capacity(bank.filters.len());

        for entry in &bank.filters {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateName(entry.name.clone()));
            }

            let filter = entry.filter.build().map_err(|source| ConfigError::Filter {
                name: entry.name.clone(),
                source,
            })?;
            built.push((entry.name.clone(), filter));
        }
        Ok(built)
    }

    /// Write `bank` to `path` in the format its extension names
    pub fn export_config<P: AsRef<Path>>(bank: &FilterBankConfig, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(bank).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            ConfigFormat::Json => serde_json::to_string_pretty(bank)?,
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn merge_banks(base: &mut FilterBankConfig, overlay: FilterBankConfig) {
    for entry in overlay.filters {
        match base.filters.iter_mut().find(|existing| existing.name == entry.name) {
            Some(existing) => *existing = entry,
            None => base.filters.push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::filter_config::{FilterConfig, NamedFilterConfig};

    const BANK: &str = r#"
        [[filters]]
        name = "smooth"
        kind = "rc"
        fc = 10.0
        fs = 100.0
        order = 2

        [[filters]]
        name = "hum"
        kind = "biquad"
        response = "notch"
        fc = 50.0
        fs = 1000.0
        shape = 0.9
        normalize = true
    "#;

    #[test]
    fn test_from_toml_str() {
        let bank = ConfigLoader::from_toml_str(BANK).unwrap();
        assert_eq!(bank.filters.len(), 2);
        assert_eq!(bank.filters[0].name, "smooth");
        assert!(matches!(bank.get("hum"), Some(FilterConfig::Biquad { .. })));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{"filters": [{"name": "taps", "kind": "fir", "coefficients": [0.5, 0.5]}]}"#;
        let bank = ConfigLoader::from_json_str(json).unwrap();

        assert_eq!(
            bank.get("taps"),
            Some(&FilterConfig::Fir {
                coefficients: vec![0.5, 0.5],
                init_value: 0.0
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ConfigLoader::from_toml_str("[[filters]]\nname = \"x\"\nkind = \"bogus\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConfigLoader::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_build_all() {
        let bank = ConfigLoader::from_toml_str(BANK).unwrap();
        let built = ConfigLoader::build_all(&bank).unwrap();

        let names: Vec<&str> = built.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["smooth", "hum"]);
    }

    #[test]
    fn test_build_all_reports_filter_name() {
        let mut bank = ConfigLoader::from_toml_str(BANK).unwrap();
        bank.filters.push(NamedFilterConfig {
            name: "broken".into(),
            filter: FilterConfig::Cr { fc: 80.0, fs: 100.0, order: 1 },
        });

        match ConfigLoader::build_all(&bank) {
            Err(ConfigError::Filter { name, source }) => {
                assert_eq!(name, "broken");
                assert_eq!(source.parameter(), Some("fc"));
            }
            other => panic!("expected filter error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_build_all_rejects_duplicates() {
        let mut bank = ConfigLoader::from_toml_str(BANK).unwrap();
        let copy = bank.filters[0].clone();
        bank.filters.push(copy);

        assert!(matches!(
            ConfigLoader::build_all(&bank),
            Err(ConfigError::DuplicateName(name)) if name == "smooth"
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            ConfigLoader::load_file("filters.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ConfigFormat::from_path(Path::new("FILTERS.TOML")),
            Ok(ConfigFormat::Toml)
        ));
    }

    #[test]
    fn test_merge_replaces_by_name() {
        let mut base = ConfigLoader::from_toml_str(BANK).unwrap();
        let overlay = ConfigLoader::from_json_str(
            r#"{"filters": [
                {"name": "smooth", "kind": "cr", "fc": 5.0, "fs": 100.0},
                {"name": "gate", "kind": "boolean", "fc": 2.0, "fs": 100.0}
            ]}"#,
        )
        .unwrap();

        merge_banks(&mut base, overlay);
        let names: Vec<&str> = base.filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["smooth", "hum", "gate"]);
        assert!(matches!(base.get("smooth"), Some(FilterConfig::Cr { order: 1, .. })));
    }
}
