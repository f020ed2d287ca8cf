//! Sealed-container pressure estimation.

use crate::factors::{SUGAR_TO_PRESSURE_FACTOR, clamped_temperature_factor, time_factor};
use kb_core::Real;

/// Estimated CO₂ pressure in atmospheres for a sealed bottle.
///
/// Negative sugar or elapsed time are treated as zero, and the temperature factor
/// is limited to `[0.5, 2.0]`, so the result is never negative.
pub fn estimate_co2(sugar_content: Real, temp: Real, time_in_days: Real) -> Real {
    let sugar = sugar_content.max(0.0);
    let days = time_in_days.max(0.0);

    sugar * clamped_temperature_factor(temp) * time_factor(days) * SUGAR_TO_PRESSURE_FACTOR
}
