//! Reading value types.

use chrono::{DateTime, Utc};
use kb_core::{Real, Temperature, in_degc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of source produced a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingOrigin {
    Hardware,
    /// Hardware thermometer, simulated pH and CO₂ (or the reverse).
    Mixed,
    Simulated,
}

impl fmt::Display for ReadingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Hardware => "hardware",
            Self::Mixed => "mixed hardware/simulated",
            Self::Simulated => "simulated",
        })
    }
}

/// One snapshot of all batch sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub taken_at: DateTime<Utc>,
    pub temperature: Temperature,
    /// pH, 0..14
    pub ph: Real,
    /// Headspace CO₂ concentration in ppm
    pub co2_ppm: Real,
    pub origin: ReadingOrigin,
}

impl Reading {
    pub fn temperature_c(&self) -> Real {
        in_degc(self.temperature)
    }
}
