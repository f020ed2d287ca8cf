//! Startup capability probing.

use crate::hardware::{DEFAULT_ONE_WIRE_ROOT, HardwareSource, OneWireThermometer};
use crate::simulated::SimulatedSource;
use crate::source::ReadingSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Where to look for one-wire devices.
    pub one_wire_root: PathBuf,
    /// Skip hardware detection entirely.
    pub force_simulation: bool,
    /// Seed for simulated values; random when unset.
    pub seed: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            one_wire_root: PathBuf::from(DEFAULT_ONE_WIRE_ROOT),
            force_simulation: false,
            seed: None,
        }
    }
}

impl ProbeConfig {
    fn simulated(&self) -> SimulatedSource {
        match self.seed {
            Some(seed) => SimulatedSource::seeded(seed),
            None => SimulatedSource::new(),
        }
    }
}

/// Choose a reading source once, at startup.
///
/// Hardware is selected when a DS18B20 is present; otherwise every reading is simulated.
pub fn probe(config: &ProbeConfig) -> Box<dyn ReadingSource> {
    if config.force_simulation {
        tracing::info!("sensor simulation forced by configuration");
        return Box::new(config.simulated());
    }

    match OneWireThermometer::discover(&config.one_wire_root) {
        Ok(thermometer) => {
            tracing::info!(
                device = %thermometer.device_file().display(),
                "hardware thermometer detected"
            );
            Box::new(HardwareSource::new(Some(thermometer), config.simulated()))
        }
        Err(err) => {
            tracing::info!(error = %err, "no sensor hardware detected, using simulated readings");
            Box::new(config.simulated())
        }
    }
}
