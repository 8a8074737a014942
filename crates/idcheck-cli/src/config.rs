//! # Configuration
//!
//! Optional YAML settings file. Resolution order:
//!
//! 1. `--config <path>` (must exist)
//! 2. `idcheck.yaml` in the current directory, if present
//! 3. Built-in defaults
//!
//! Command-line flags override whatever the file sets.
//!
//! ```yaml
//! mask_char: "#"
//! default_country: GB
//! reference_year: 2026
//! output: json
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use idcheck_core::{patterns, Inspector};

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "idcheck.yaml";

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// User preferences loaded from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Character used to mask card numbers.
    pub mask_char: char,
    /// Country for postal codes when `--country` is not given.
    pub default_country: String,
    /// Reference year for VIN model-year decoding; current year if unset.
    pub reference_year: Option<i32>,
    /// Output format.
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mask_char: '*',
            default_country: "US".to_string(),
            reference_year: None,
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Reject settings that no command could use.
    pub fn validate(&self) -> Result<()> {
        if self.mask_char.is_ascii_digit() {
            bail!("mask_char must not be a digit, got {:?}", self.mask_char);
        }
        if self.mask_char.is_control() {
            bail!("mask_char must be printable, got {:?}", self.mask_char);
        }
        if !patterns::supported_postal_countries()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(self.default_country.trim()))
        {
            bail!(
                "default_country {:?} has no postal code pattern (supported: {})",
                self.default_country,
                patterns::supported_postal_countries().join(", ")
            );
        }
        Ok(())
    }

    /// An inspector configured from these settings.
    pub fn inspector(&self) -> Inspector {
        Inspector::new()
            .with_mask_char(self.mask_char)
            .with_default_country(self.default_country.trim().to_ascii_uppercase())
            .with_reference_year(self.reference_year)
    }
}

/// Load settings following the resolution order above.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => read_settings(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                read_settings(fallback)
            } else {
                tracing::debug!("no config file; using defaults");
                Ok(Settings::default())
            }
        }
    }
}

/// Read and validate a settings file.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file: {}", path.display()))?;
    let settings: Settings = if content.trim().is_empty() {
        Settings::default()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file: {}", path.display()))?
    };
    settings
        .validate()
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(settings)
}
