//! Optional YAML configuration.
//!
//! ```yaml
//! data_file: ~/brews/kombucha_data.json
//! thresholds:
//!   warning_atm: 1.5
//!   danger_atm: 2.5
//! sensors:
//!   one_wire_root: /sys/bus/w1/devices
//!   force_simulation: false
//!   seed: 42
//! ```

use crate::error::{CliError, CliResult};
use kb_model::Thresholds;
use kb_sensors::ProbeConfig;
use kb_store::json_store::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kombuflow.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_file: PathBuf,
    /// Used for a new data file, and when the data file cannot be read.
    pub thresholds: Thresholds,
    pub sensors: ProbeConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            thresholds: Thresholds::default(),
            sensors: ProbeConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn from_yaml(content: &str, path: &Path) -> CliResult<Self> {
        serde_yaml::from_str(content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path must exist; the implicit default may be absent.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_yaml(&content, &path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
