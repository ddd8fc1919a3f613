// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::metrics::PageRankConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the collector's dataset
    pub dataset: PathBuf,
    /// Number of users listed per metric
    pub top_k: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Read edge weights as distances when computing closeness
    pub closeness_weighted: bool,
    /// PageRank parameters
    pub pagerank: PageRankConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dados_github.json"),
            top_k: 10,
            log_level: "info".to_string(),
            closeness_weighted: false,
            pagerank: PageRankConfig::default(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`]
    pub const KEYS: [&'static str; 7] = [
        "dataset",
        "top_k",
        "log_level",
        "closeness_weighted",
        "pagerank.alpha",
        "pagerank.max_iter",
        "pagerank.tolerance",
    ];

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Value of one key rendered as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "dataset" => self.dataset.display().to_string(),
            "top_k" => self.top_k.to_string(),
            "log_level" => self.log_level.clone(),
            "closeness_weighted" => self.closeness_weighted.to_string(),
            "pagerank.alpha" => self.pagerank.alpha.to_string(),
            "pagerank.max_iter" => self.pagerank.max_iter.to_string(),
            "pagerank.tolerance" => self.pagerank.tolerance.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Default configuration file location
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "collabgraph")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from disk or use defaults.
///
/// An explicit path must exist. Without one the default location is read
/// when present.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => {
                debug!("No configuration file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = Config::from_toml(&content)
        .with_context(|| format!("Invalid config at {}", path.display()))?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("top_k = 3\n[pagerank]\nalpha = 0.9\n").unwrap();

        assert_eq!(config.top_k, 3);
        assert_eq!(config.pagerank.alpha, 0.9);
        assert_eq!(config.pagerank.max_iter, 100);
        assert_eq!(config.dataset, PathBuf::from("dados_github.json"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = Config::default();
        for key in Config::KEYS {
            assert!(config.get(key).is_some(), "missing {key}");
        }
        assert_eq!(config.get("top_k").as_deref(), Some("10"));
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dataset = \"data.json\"").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.dataset, PathBuf::from("data.json"));

        assert!(load(Some(Path::new("/nonexistent/collabgraph.toml"))).is_err());
    }
}
