//! Configuration loading from strictenum.toml.
//!
//! ```toml
//! exclude = ["generated"]
//! tests = false
//!
//! [output]
//! format = "json"
//!
//! [settings]
//! # forwarded to the checker's settings decoder
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// File name looked up at the analysis root.
pub const CONFIG_FILE: &str = "strictenum.toml";

/// Main configuration structure for strictenum.toml.
#[derive(Debug, Deserialize, Default)]
pub struct StrictEnumConfig {
    /// Extra directory names to skip while scanning.
    pub exclude: Option<Vec<String>>,
    /// Whether `_test.go` files are analyzed (default: true).
    pub tests: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
    /// Raw checker settings payload.
    pub settings: Option<toml::Value>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl StrictEnumConfig {
    /// Checker settings converted to the host-neutral JSON form.
    pub fn settings_payload(&self) -> Result<Option<serde_json::Value>> {
        self.settings
            .as_ref()
            .map(|value| serde_json::to_value(value).context("Invalid [settings] table"))
            .transpose()
    }

    /// Whether the configured output format is JSON.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from strictenum.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<StrictEnumConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = toml::from_str(&content).context("Invalid strictenum.toml")?;
    Ok(Some(cfg))
}
