//! User configuration, read from `config.toml` in the platform config directory.
//!
//! Every key is optional; a missing file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Display label only; amounts are never converted.
    pub(crate) currency: String,
    /// Whole units pre-filled into the income field.
    pub(crate) default_income: i64,
    pub(crate) fixed_categories: Vec<String>,
    pub(crate) variable_categories: Vec<String>,
    pub(crate) export: ExportConfig,
    pub(crate) logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "NOK".into(),
            default_income: 50000,
            fixed_categories: vec!["Rent".into(), "Loan Payments".into(), "Utilities".into()],
            variable_categories: vec!["Groceries".into(), "Leisure".into(), "Transport".into()],
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ExportConfig {
    pub(crate) file_name: String,
    /// Defaults to the working directory. `~/` is expanded.
    pub(crate) directory: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: crate::export::DEFAULT_JSON_FILE.into(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub(crate) level: String,
    /// File name inside the data directory, used while the TUI owns the terminal.
    pub(crate) file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            file: "budgetform.log".into(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    /// A missing file is not an error.
    pub(crate) fn load(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        if !path.exists() {
            return Ok((Self::default(), path));
        }
        let config = Self::load_from(&path)?;
        Ok((config, path))
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        if config.export.file_name.trim().is_empty() {
            anyhow::bail!("export.file_name must not be empty");
        }
        Ok(config)
    }

    pub(crate) fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Where a JSON export goes when no explicit path is given.
    pub(crate) fn default_export_path(&self) -> PathBuf {
        let dir = self
            .export
            .directory
            .as_deref()
            .map(|d| PathBuf::from(crate::ui::util::shellexpand(d)))
            .unwrap_or_default();
        dir.join(&self.export.file_name)
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "budgetform", "budgetform")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

pub(crate) fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Data directory (log file lives here). Created on demand.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
