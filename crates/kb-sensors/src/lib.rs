//! kb-sensors: batch reading sources for kombuflow.
//!
//! A [`ReadingSource`] yields plain temperature, pH and CO₂ readings. Two variants exist:
//! - [`HardwareSource`]: a DS18B20 one-wire thermometer plus optional analog probes
//! - [`SimulatedSource`]: plausible random values for machines without sensors
//!
//! [`probe`] picks one at startup. Consumers only ever see scalar readings and
//! never need to know which variant produced them.

pub mod error;
pub mod hardware;
pub mod probe;
pub mod reading;
pub mod simulated;
pub mod source;

pub use error::{SensorError, SensorResult};
pub use hardware::{HardwareSource, OneWireThermometer, co2_ppm_from_voltage, ph_from_voltage};
pub use probe::{ProbeConfig, probe};
pub use reading::{Reading, ReadingOrigin};
pub use simulated::SimulatedSource;
pub use source::{AnalogChannel, ReadingSource};
