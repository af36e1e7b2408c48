//! Editor configuration.
//!
//! The query editor has a handful of tunables: the template-variable sigil,
//! the labels used for synthetic list entries and the catalog fetch timeout.
//! They are read from a TOML file; every field is optional.
//!
//! # Location
//!
//! [`EditorConfig::load_default`] looks in this order:
//! 1. The path in the `ZBXQ_CONFIG_PATH` environment variable (must exist)
//! 2. `<config dir>/zbx-query/config.toml` (used if present)
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! template_sigil = "$"
//! wildcard_label = "Any"
//! fetch_timeout_ms = 5000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_FETCH_TIMEOUT_MS, ITEM_ALL_LABEL, LOADING_LABEL, TEMPLATE_SIGIL,
    WILDCARD_LABEL, WILDCARD_NAME,
};

/// Tunables for the cascade resolver and query editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Prefix for template variable candidates (`$` gives `$region`).
    pub template_sigil: String,

    /// Name of the wildcard entry for group, host and application lists.
    pub wildcard_name: String,

    /// Visible label of the wildcard entry.
    pub wildcard_label: String,

    /// Name of the leading, non-wildcard entry of the item list.
    pub item_all_label: String,

    /// Placeholder shown before the first refresh.
    pub loading_label: String,

    /// Per-fetch timeout in milliseconds. `0` disables the timeout.
    pub fetch_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            template_sigil: TEMPLATE_SIGIL.to_string(),
            wildcard_name: WILDCARD_NAME.to_string(),
            wildcard_label: WILDCARD_LABEL.to_string(),
            item_all_label: ITEM_ALL_LABEL.to_string(),
            loading_label: LOADING_LABEL.to_string(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields fall back to their defaults. An empty sigil is rejected
    /// because template candidates would become indistinguishable from
    /// catalog entries.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate().with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Load configuration from the default location, or return the defaults.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config file path, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zbx-query").join("config.toml"))
    }

    /// Fetch timeout, or `None` when timeouts are disabled.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_ms > 0).then(|| Duration::from_millis(self.fetch_timeout_ms))
    }

    fn validate(&self) -> Result<(), crate::core::QueryError> {
        if self.template_sigil.is_empty() {
            return Err(crate::core::QueryError::Config {
                message: "template_sigil must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
