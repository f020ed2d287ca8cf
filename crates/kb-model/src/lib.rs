//! kb-model: fermentation estimation engine for kombuflow.
//!
//! Provides:
//! - CO₂ mass produced from sugar over time ([`calculate_co2_production`])
//! - Completion percentage against theoretical yield ([`estimate_fermentation_completion`])
//! - Equivalent sealed-bottle pressure ([`estimate_co2`])
//! - Inverse estimate of the sugar required for a CO₂ target ([`calculate_sugar_needed`])
//! - Day-by-day projections ([`predict_co2_timeline`], [`project_co2_window`])
//! - Risk classification of a pressure estimate against ordered thresholds
//!
//! # Architecture
//!
//! Every estimator is a pure function of scalar inputs. Nothing here holds state or
//! performs I/O, so all calls are safe to run concurrently and are idempotent.
//! The piecewise time curve is shared between the mass and pressure estimators
//! (see [`factors::time_factor`]); the two deliberately differ in how they treat
//! temperature and negative inputs.
//!
//! # Example
//!
//! ```
//! use kb_model::{calculate_co2_production, estimate_co2, Thresholds, RiskLevel};
//!
//! let co2 = calculate_co2_production(200.0, 14.0, 25.0, 2.0);
//! assert!((co2 - 82.8).abs() < 1e-9);
//!
//! let pressure = estimate_co2(200.0, 30.0, 7.0);
//! let level = Thresholds::default().classify(pressure);
//! assert_eq!(level, RiskLevel::Warning);
//! ```

pub mod co2;
pub mod error;
pub mod estimate;
pub mod factors;
pub mod pressure;
pub mod risk;
pub mod timeline;

// Re-exports for ergonomics
pub use co2::{calculate_co2_production, calculate_sugar_needed, estimate_fermentation_completion};
pub use error::{ModelError, ModelResult};
pub use estimate::{BatchEstimate, BatchInputs, estimate_batch};
pub use factors::{
    DEFAULT_TEMPERATURE_C, DEFAULT_TIMELINE_DAYS, DEFAULT_VOLUME_L, MAX_CO2_RATIO,
    REFERENCE_TEMPERATURE_C, SUGAR_TO_PRESSURE_FACTOR,
};
pub use pressure::estimate_co2;
pub use risk::{AlertEntry, RiskLevel, Thresholds, rank_alerts};
pub use timeline::{DEFAULT_WINDOW_DAYS, TimelinePoint, predict_co2_timeline, project_co2_window};
