//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::error::{InventoryError, Result};

/// Database file used when nothing else is configured
pub const DEFAULT_DATABASE: &str = "itrack.db";

/// Log filter used when nothing else is configured
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// itrack configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database: Option<PathBuf>,

    /// tracing filter directive, e.g. `info` or `itrack=debug`
    pub log_level: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order:
    /// global file, then `.itrack/config.yaml` in the current directory, then
    /// `ITRACK_DB` / `ITRACK_LOG`.
    pub fn load() -> Result<Self> {
        let project_path = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(".itrack").join("config.yaml"));
        let mut config = Self::load_files(
            Self::global_config_path().as_deref(),
            project_path.as_deref(),
        )?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Merge the given files in order; missing files are skipped
    pub fn load_files(global: Option<&Path>, project: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();
        for path in [global, project].into_iter().flatten() {
            if let Some(layer) = Self::read_file(path)? {
                config.merge(layer);
            }
        }
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InventoryError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        if contents.trim().is_empty() {
            return Ok(Some(Config::default()));
        }
        let config = serde_yml::from_str::<Config>(&contents).map_err(|e| {
            InventoryError::Config(format!("invalid YAML in {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(config))
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(db) = lookup("ITRACK_DB").filter(|v| !v.is_empty()) {
            self.database = Some(PathBuf::from(db));
        }
        if let Some(level) = lookup("ITRACK_LOG").filter(|v| !v.is_empty()) {
            self.log_level = Some(level);
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "itrack")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Database path, with `--db` taking precedence over every file and variable
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
