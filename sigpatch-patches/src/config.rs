use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed patch configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tunable parameters of the built-in heuristics.
///
/// Every field has a default, so a configuration file only needs the keys
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Instructions searched after the telemetry marker for a boolean read.
    pub lookahead_window: usize,
    /// Tier returned by the tier accessor.
    pub elevated_tier: i32,
    /// Literals identifying server-change delay accessors.
    pub delay_literals: Vec<i64>,
    /// String loaded right before the telemetry flag is read.
    pub telemetry_marker: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            lookahead_window: 15,
            elevated_tier: 2,
            delay_literals: vec![90, 1200],
            telemetry_marker: "Telemetry: ".to_string(),
        }
    }
}

impl PatchConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}
