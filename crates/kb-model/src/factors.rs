//! Multiplicative factors shared by the estimators.
//!
//! All factors are dimensionless. [`time_factor`] is the single source of the
//! piecewise fermentation curve; both the mass and the pressure estimator call it.

use kb_core::Real;

/// Grams of CO₂ per gram of sugar at full stoichiometric conversion.
pub const MAX_CO2_RATIO: Real = 0.46;

/// Atmospheres of bottle pressure per gram of effective sugar.
pub const SUGAR_TO_PRESSURE_FACTOR: Real = 0.01;

/// Temperature at which the temperature factor is exactly 1.
pub const REFERENCE_TEMPERATURE_C: Real = 25.0;

pub const DEFAULT_TEMPERATURE_C: Real = 25.0;
pub const DEFAULT_VOLUME_L: Real = 1.0;
pub const DEFAULT_TIMELINE_DAYS: u32 = 28;

/// Fractional change in rate per °C away from the reference temperature.
const TEMP_SENSITIVITY_PER_C: Real = 0.05;

const TEMP_FACTOR_MIN: Real = 0.5;
const TEMP_FACTOR_MAX: Real = 2.0;

/// Batches up to this size ferment at full efficiency.
const VOLUME_EFFICIENT_UP_TO_L: Real = 2.0;
const VOLUME_PENALTY_PER_10_L: Real = 0.05;
const VOLUME_FACTOR_FLOOR: Real = 0.8;

/// Fraction of the theoretical yield converted after `days` of fermentation.
///
/// Piecewise linear and continuous, with a diminishing rate:
///
/// | days        | factor                          |
/// |-------------|---------------------------------|
/// | `≤ 0`       | `0`                             |
/// | `(0, 7]`    | `0.7 · d/7`                     |
/// | `(7, 14]`   | `0.7 + 0.2 · (d − 7)/7`         |
/// | `(14, 28]`  | `0.9 + 0.1 · (d − 14)/14`       |
/// | `> 28`      | `1`                             |
pub fn time_factor(days: Real) -> Real {
    if days <= 0.0 {
        0.0
    } else if days <= 7.0 {
        0.7 * (days / 7.0)
    } else if days <= 14.0 {
        0.7 + 0.2 * ((days - 7.0) / 7.0)
    } else if days <= 28.0 {
        0.9 + 0.1 * ((days - 14.0) / 14.0)
    } else {
        1.0
    }
}

/// Linear temperature factor, 5% per °C around 25 °C. Unbounded.
pub fn temperature_factor(temperature_c: Real) -> Real {
    1.0 + (temperature_c - REFERENCE_TEMPERATURE_C) * TEMP_SENSITIVITY_PER_C
}

/// [`temperature_factor`] limited to `[0.5, 2.0]`, as used by the pressure estimator.
pub fn clamped_temperature_factor(temperature_c: Real) -> Real {
    temperature_factor(temperature_c).clamp(TEMP_FACTOR_MIN, TEMP_FACTOR_MAX)
}

/// Conversion efficiency by batch size: 0.5% lost per liter above 2 L, never below 0.8.
pub fn volume_factor(volume_l: Real) -> Real {
    let excess = (volume_l - VOLUME_EFFICIENT_UP_TO_L).max(0.0);
    (1.0 - VOLUME_PENALTY_PER_10_L * excess / 10.0).max(VOLUME_FACTOR_FLOOR)
}
