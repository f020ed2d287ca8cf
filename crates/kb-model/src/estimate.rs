//! Combined per-reading estimate.
//!
//! A measurement records mass, completion and pressure together; this bundles the
//! three estimator calls so every caller derives them from the same inputs.

use crate::co2::{calculate_co2_production, estimate_fermentation_completion};
use crate::factors::{DEFAULT_TEMPERATURE_C, DEFAULT_VOLUME_L};
use crate::pressure::estimate_co2;
use crate::risk::{RiskLevel, Thresholds};
use kb_core::Real;
use serde::{Deserialize, Serialize};

/// Scalar observations for one batch at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchInputs {
    /// Sugar in grams.
    pub sugar_g: Real,
    /// Elapsed fermentation days.
    pub days: Real,
    /// Average temperature in °C.
    pub temperature_c: Real,
    /// Batch volume in liters.
    pub volume_l: Real,
}

impl BatchInputs {
    /// Inputs at the default temperature (25 °C) and volume (1 L).
    pub fn new(sugar_g: Real, days: Real) -> Self {
        Self {
            sugar_g,
            days,
            temperature_c: DEFAULT_TEMPERATURE_C,
            volume_l: DEFAULT_VOLUME_L,
        }
    }

    pub fn with_temperature(mut self, temperature_c: Real) -> Self {
        self.temperature_c = temperature_c;
        self
    }

    pub fn with_volume(mut self, volume_l: Real) -> Self {
        self.volume_l = volume_l;
        self
    }
}

/// Engine outputs for one [`BatchInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchEstimate {
    pub co2_g: Real,
    pub completion_pct: Real,
    pub pressure_atm: Real,
}

impl BatchEstimate {
    pub fn risk(&self, thresholds: &Thresholds) -> RiskLevel {
        thresholds.classify(self.pressure_atm)
    }
}

pub fn estimate_batch(inputs: &BatchInputs) -> BatchEstimate {
    let co2_g = calculate_co2_production(
        inputs.sugar_g,
        inputs.days,
        inputs.temperature_c,
        inputs.volume_l,
    );
    let completion_pct = estimate_fermentation_completion(inputs.sugar_g, co2_g);
    let pressure_atm = estimate_co2(inputs.sugar_g, inputs.temperature_c, inputs.days);

    tracing::trace!(
        sugar_g = inputs.sugar_g,
        days = inputs.days,
        co2_g,
        completion_pct,
        pressure_atm,
        "batch estimate"
    );

    BatchEstimate {
        co2_g,
        completion_pct,
        pressure_atm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_conditions() {
        let inputs = BatchInputs::new(200.0, 7.0);
        assert_eq!(inputs.temperature_c, 25.0);
        assert_eq!(inputs.volume_l, 1.0);
    }

    #[test]
    fn bundle_agrees_with_individual_estimators() {
        let inputs = BatchInputs::new(200.0, 7.0)
            .with_temperature(30.0)
            .with_volume(2.0);
        let est = estimate_batch(&inputs);

        assert_eq!(est.co2_g, calculate_co2_production(200.0, 7.0, 30.0, 2.0));
        assert!((est.pressure_atm - 1.75).abs() < 1e-9);
        // 0.7 of the yield at 1.25x temperature
        assert!((est.completion_pct - 87.5).abs() < 1e-9);
        assert_eq!(est.risk(&Thresholds::default()), RiskLevel::Warning);
    }
}
