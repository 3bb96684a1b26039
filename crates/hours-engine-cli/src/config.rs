//! Schedule file loading.
//!
//! A config file holds the reference timezone and the weekly schedule:
//!
//! ```toml
//! timezone = "Europe/Rome"
//!
//! [opening_hours.monday]
//! lunch = { open = "12:00", close = "14:30" }
//! dinner = { open = "18:00", close = "22:00" }
//!
//! [opening_hours.saturday]
//! open = "11:00"
//! close = "23:00"
//! ```
//!
//! `.json` files use the same keys.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hours_engine::{AvailabilityEvaluator, OpeningHours, DEFAULT_TIMEZONE};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// IANA timezone name; the engine default when absent.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub opening_hours: OpeningHours,
}

impl Config {
    /// Load a `.toml` or `.json` schedule file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))?,
            _ => bail!(
                "Unsupported config format for {} (expected .toml or .json)",
                path.display()
            ),
        };

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Build the evaluator. `override_tz` (flag or env) wins over the file.
    pub fn evaluator(&self, override_tz: Option<&str>) -> Result<AvailabilityEvaluator> {
        match override_tz.or(self.timezone.as_deref()) {
            Some(name) => AvailabilityEvaluator::from_timezone_name(name)
                .context("Failed to configure reference timezone"),
            None => {
                debug!(timezone = %DEFAULT_TIMEZONE, "no timezone configured, using default");
                Ok(AvailabilityEvaluator::default())
            }
        }
    }
}
