//! Estimation errors.

use kb_core::KbError;
use thiserror::Error;

/// Result type for estimation operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the few engine entry points that are not total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The fermentation window produces no CO₂, so no amount of sugar reaches the target.
    #[error("No CO₂ is produced over {days} days; sugar needed is undefined")]
    NoProductionWindow { days: f64 },

    /// Warning threshold must sit strictly below the danger threshold.
    #[error("Warning threshold {warning_atm} atm must be below danger threshold {danger_atm} atm")]
    ThresholdOrder { warning_atm: f64, danger_atm: f64 },
}

impl From<ModelError> for KbError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidArg { what } => KbError::InvalidArg { what },
            ModelError::NoProductionWindow { .. } => KbError::InvalidArg {
                what: "fermentation window produces no CO2",
            },
            ModelError::ThresholdOrder { .. } => KbError::Invariant {
                what: "warning threshold must be below danger threshold",
            },
        }
    }
}
