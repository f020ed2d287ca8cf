//! Source traits.

use crate::error::SensorResult;
use crate::reading::{Reading, ReadingOrigin};
use chrono::Utc;
use kb_core::{Real, Temperature};

/// Anything that can produce batch readings.
///
/// Implementations may fall back internally (e.g. to simulated values) but must
/// always hand back plain scalars.
pub trait ReadingSource: Send {
    fn temperature(&mut self) -> SensorResult<Temperature>;

    fn ph(&mut self) -> SensorResult<Real>;

    fn co2_ppm(&mut self) -> SensorResult<Real>;

    fn origin(&self) -> ReadingOrigin;

    /// Read all sensors once.
    fn read(&mut self) -> SensorResult<Reading> {
        Ok(Reading {
            taken_at: Utc::now(),
            temperature: self.temperature()?,
            ph: self.ph()?,
            co2_ppm: self.co2_ppm()?,
            origin: self.origin(),
        })
    }
}

/// A single ADC input, reported in volts.
pub trait AnalogChannel: Send {
    fn voltage(&mut self) -> SensorResult<Real>;
}
