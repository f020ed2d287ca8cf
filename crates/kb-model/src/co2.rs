//! CO₂ mass estimation.

use crate::error::{ModelError, ModelResult};
use crate::factors::{MAX_CO2_RATIO, temperature_factor, time_factor, volume_factor};
use kb_core::Real;

/// Estimated grams of CO₂ produced from `sugar_amount` grams of sugar after `days`.
///
/// `sugar_amount · 0.46 · temperature · time · volume`. The temperature factor is
/// not clamped here, unlike [`crate::estimate_co2`]. Non-positive `days` yields zero.
pub fn calculate_co2_production(
    sugar_amount: Real,
    days: Real,
    temperature: Real,
    volume: Real,
) -> Real {
    sugar_amount
        * MAX_CO2_RATIO
        * temperature_factor(temperature)
        * time_factor(days)
        * volume_factor(volume)
}

/// Percentage of the theoretical maximum CO₂ yield reached, capped at 100.
///
/// Returns 0 when there is no sugar to convert. There is no lower clamp.
pub fn estimate_fermentation_completion(sugar_amount: Real, co2_produced: Real) -> Real {
    let max_co2 = sugar_amount * MAX_CO2_RATIO;
    let completion = if max_co2 > 0.0 {
        co2_produced / max_co2 * 100.0
    } else {
        0.0
    };
    completion.min(100.0)
}

/// Grams of sugar needed to produce `target_co2` grams of CO₂ over `days`.
///
/// A single corrective step on the stoichiometric guess `target / 0.46`. The model
/// is linear in sugar, so the step is exact whenever the window produces any CO₂.
///
/// # Errors
///
/// * [`ModelError::InvalidArg`] for a negative or non-finite target.
/// * [`ModelError::NoProductionWindow`] when the conditions produce no CO₂
///   (e.g. `days ≤ 0`) but the target is positive.
pub fn calculate_sugar_needed(
    target_co2: Real,
    days: Real,
    temperature: Real,
    volume: Real,
) -> ModelResult<Real> {
    if !target_co2.is_finite() || target_co2 < 0.0 {
        return Err(ModelError::InvalidArg {
            what: "target_co2 must be finite and non-negative",
        });
    }
    if target_co2 == 0.0 {
        return Ok(0.0);
    }

    let initial_guess = target_co2 / MAX_CO2_RATIO;
    let test_co2 = calculate_co2_production(initial_guess, days, temperature, volume);

    if test_co2 <= 0.0 || !test_co2.is_finite() {
        tracing::debug!(days, temperature, volume, "sugar estimate has no production window");
        return Err(ModelError::NoProductionWindow { days });
    }

    let adjustment = target_co2 / test_co2;
    Ok(initial_guess * adjustment)
}
