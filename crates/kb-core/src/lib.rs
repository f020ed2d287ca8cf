//! kb-core: stable foundation for kombuflow.
//!
//! Contains:
//! - units (uom temperature and pressure types with °C / atm helpers)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::KbError;
pub use numeric::*;
pub use units::*;
