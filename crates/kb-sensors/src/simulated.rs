//! Simulated readings for machines without batch sensors.

use crate::error::SensorResult;
use crate::reading::ReadingOrigin;
use crate::source::ReadingSource;
use chrono::{Local, Timelike};
use kb_core::{Real, Temperature, degc, round_to};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Typical fermentation room temperature.
const BASE_TEMPERATURE_C: Real = 24.0;
const TEMPERATURE_SPREAD_C: Real = 2.0;
/// Hour of day with the largest temperature swing.
const PEAK_HOUR: Real = 14.0;

pub struct SimulatedSource {
    rng: StdRng,
    /// Fixed hour of day, or `None` to use the local clock.
    hour: Option<u32>,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            hour: None,
        }
    }

    /// Deterministic sequence for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hour: None,
        }
    }

    /// Pin the simulated hour of day instead of reading the clock.
    pub fn at_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour % 24);
        self
    }

    fn current_hour(&self) -> u32 {
        self.hour.unwrap_or_else(|| Local::now().hour())
    }

    pub(crate) fn simulate_temperature_c(&mut self) -> Real {
        let variation = self.rng.gen_range(-TEMPERATURE_SPREAD_C..=TEMPERATURE_SPREAD_C);
        let day_factor = day_factor(self.current_hour());
        round_to(BASE_TEMPERATURE_C + variation * day_factor, 1)
    }

    pub(crate) fn simulate_ph(&mut self) -> Real {
        round_to(self.rng.gen_range(2.5..=3.5), 1)
    }

    pub(crate) fn simulate_co2_ppm(&mut self) -> Real {
        self.rng.gen_range(1_000.0..=5_000.0_f64).round()
    }
}

/// Swing multiplier: 1.0 at midnight, 1.5 at the afternoon peak.
fn day_factor(hour: u32) -> Real {
    1.0 + 0.5 * (1.0 - (Real::from(hour) - PEAK_HOUR).abs() / PEAK_HOUR)
}

impl ReadingSource for SimulatedSource {
    fn temperature(&mut self) -> SensorResult<Temperature> {
        Ok(degc(self.simulate_temperature_c()))
    }

    fn ph(&mut self) -> SensorResult<Real> {
        Ok(self.simulate_ph())
    }

    fn co2_ppm(&mut self) -> SensorResult<Real> {
        Ok(self.simulate_co2_ppm())
    }

    fn origin(&self) -> ReadingOrigin {
        ReadingOrigin::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::in_degc;

    #[test]
    fn day_factor_peaks_mid_afternoon() {
        assert!((day_factor(14) - 1.5).abs() < 1e-12);
        assert!((day_factor(0) - 1.0).abs() < 1e-12);
        assert!(day_factor(20) < day_factor(14));
    }

    #[test]
    fn readings_stay_in_plausible_ranges() {
        let mut source = SimulatedSource::seeded(7).at_hour(14);
        for _ in 0..200 {
            let t = in_degc(source.temperature().unwrap());
            assert!((21.0..=27.0).contains(&t), "temperature {t}");

            let ph = source.ph().unwrap();
            assert!((2.5..=3.5).contains(&ph), "ph {ph}");

            let co2 = source.co2_ppm().unwrap();
            assert!((1_000.0..=5_000.0).contains(&co2), "co2 {co2}");
            assert_eq!(co2, co2.round());
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = SimulatedSource::seeded(42).at_hour(9);
        let mut b = SimulatedSource::seeded(42).at_hour(9);
        assert_eq!(a.ph().unwrap(), b.ph().unwrap());
        assert_eq!(a.co2_ppm().unwrap(), b.co2_ppm().unwrap());
    }

    #[test]
    fn origin_is_simulated() {
        let mut source = SimulatedSource::seeded(1);
        assert_eq!(source.read().unwrap().origin, ReadingOrigin::Simulated);
    }
}
