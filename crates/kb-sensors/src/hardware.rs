//! Physical sensors: a DS18B20 one-wire thermometer and analog pH / CO₂ probes.
//!
//! Any failed hardware read is logged and replaced by a simulated value for that
//! reading only; the next call tries the hardware again.

use crate::error::{SensorError, SensorResult};
use crate::reading::ReadingOrigin;
use crate::simulated::SimulatedSource;
use crate::source::{AnalogChannel, ReadingSource};
use kb_core::{Real, Temperature, degc, round_to};
use std::fs;
use std::path::{Path, PathBuf};

/// Sysfs directory where the kernel exposes one-wire devices.
pub const DEFAULT_ONE_WIRE_ROOT: &str = "/sys/bus/w1/devices";

/// DS18B20 family code prefix.
const DS18B20_PREFIX: &str = "28-";

/// pH probe output at neutral pH, and volts per pH unit.
const PH_NEUTRAL_V: Real = 2.5;
const PH_V_PER_UNIT: Real = 0.18;

/// A DS18B20 exposed through the kernel `w1_slave` file.
#[derive(Debug, Clone)]
pub struct OneWireThermometer {
    device_file: PathBuf,
}

impl OneWireThermometer {
    /// Find the first DS18B20 under `root`.
    pub fn discover(root: &Path) -> SensorResult<Self> {
        let entries = fs::read_dir(root).map_err(|source| SensorError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(DS18B20_PREFIX))
            .map(|e| e.path())
            .collect();
        candidates.sort();

        candidates
            .into_iter()
            .next()
            .map(|dir| Self {
                device_file: dir.join("w1_slave"),
            })
            .ok_or_else(|| SensorError::NoDevice {
                root: root.to_path_buf(),
            })
    }

    pub fn device_file(&self) -> &Path {
        &self.device_file
    }

    pub fn read(&self) -> SensorResult<Temperature> {
        let content = fs::read_to_string(&self.device_file).map_err(|source| SensorError::Io {
            path: self.device_file.clone(),
            source,
        })?;
        parse_w1_slave(&content).map(degc)
    }
}

/// Parse `w1_slave` output into °C.
///
/// ```text
/// 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
/// 72 01 4b 46 7f ff 0e 10 57 t=23125
/// ```
pub fn parse_w1_slave(content: &str) -> SensorResult<Real> {
    let mut lines = content.lines();
    let crc_line = lines.next().ok_or_else(|| SensorError::Parse {
        what: "empty w1_slave output".to_string(),
    })?;
    if !crc_line.trim_end().ends_with("YES") {
        return Err(SensorError::CrcMismatch);
    }

    let data_line = lines.next().ok_or_else(|| SensorError::Parse {
        what: "missing temperature line".to_string(),
    })?;
    let pos = data_line.find("t=").ok_or_else(|| SensorError::Parse {
        what: "missing t= field".to_string(),
    })?;
    let raw = data_line[pos + 2..].trim();
    let millis = raw
        .parse::<Real>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SensorError::Parse {
            what: format!("bad temperature value '{raw}'"),
        })?;
    Ok(millis / 1000.0)
}

/// pH from probe voltage, limited to the 0..14 scale and rounded to 0.1.
pub fn ph_from_voltage(volts: Real) -> Real {
    let ph = 7.0 - (volts - PH_NEUTRAL_V) / PH_V_PER_UNIT;
    round_to(ph.clamp(0.0, 14.0), 1)
}

/// CO₂ concentration from sensor voltage (1000 ppm per volt).
pub fn co2_ppm_from_voltage(volts: Real) -> Real {
    volts * 1000.0
}

pub struct HardwareSource {
    thermometer: Option<OneWireThermometer>,
    ph_channel: Option<Box<dyn AnalogChannel>>,
    co2_channel: Option<Box<dyn AnalogChannel>>,
    fallback: SimulatedSource,
}

impl HardwareSource {
    pub fn new(thermometer: Option<OneWireThermometer>, fallback: SimulatedSource) -> Self {
        Self {
            thermometer,
            ph_channel: None,
            co2_channel: None,
            fallback,
        }
    }

    pub fn with_ph_channel(mut self, channel: Box<dyn AnalogChannel>) -> Self {
        self.ph_channel = Some(channel);
        self
    }

    pub fn with_co2_channel(mut self, channel: Box<dyn AnalogChannel>) -> Self {
        self.co2_channel = Some(channel);
        self
    }

    fn read_channel(
        channel: Option<&mut Box<dyn AnalogChannel>>,
        what: &'static str,
    ) -> Option<Real> {
        let channel = channel?;
        match channel.voltage() {
            Ok(v) if v.is_finite() => Some(v),
            Ok(v) => {
                tracing::warn!(sensor = what, volts = v, "non-finite voltage, using simulated value");
                None
            }
            Err(err) => {
                tracing::warn!(sensor = what, error = %err, "read failed, using simulated value");
                None
            }
        }
    }
}

impl ReadingSource for HardwareSource {
    fn temperature(&mut self) -> SensorResult<Temperature> {
        if let Some(thermometer) = &self.thermometer {
            match thermometer.read() {
                Ok(t) => return Ok(t),
                Err(err) => {
                    tracing::warn!(
                        device = %thermometer.device_file().display(),
                        error = %err,
                        "thermometer read failed, using simulated value"
                    );
                }
            }
        }
        Ok(degc(self.fallback.simulate_temperature_c()))
    }

    fn ph(&mut self) -> SensorResult<Real> {
        match Self::read_channel(self.ph_channel.as_mut(), "ph") {
            Some(volts) => Ok(ph_from_voltage(volts)),
            None => Ok(self.fallback.simulate_ph()),
        }
    }

    fn co2_ppm(&mut self) -> SensorResult<Real> {
        match Self::read_channel(self.co2_channel.as_mut(), "co2") {
            Some(volts) => Ok(co2_ppm_from_voltage(volts)),
            None => Ok(self.fallback.simulate_co2_ppm()),
        }
    }

    /// `Mixed` when some readings can only ever come from the simulator.
    fn origin(&self) -> ReadingOrigin {
        let attached = [
            self.thermometer.is_some(),
            self.ph_channel.is_some(),
            self.co2_channel.is_some(),
        ];
        if attached.iter().all(|&a| a) {
            ReadingOrigin::Hardware
        } else if attached.iter().any(|&a| a) {
            ReadingOrigin::Mixed
        } else {
            ReadingOrigin::Simulated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
                        72 01 4b 46 7f ff 0e 10 57 t=23125\n";

    #[test]
    fn parses_valid_output() {
        let t = parse_w1_slave(GOOD).unwrap();
        assert!((t - 23.125).abs() < 1e-12);
    }

    #[test]
    fn rejects_failed_crc() {
        let bad = GOOD.replace("YES", "NO");
        assert!(matches!(parse_w1_slave(&bad), Err(SensorError::CrcMismatch)));
    }

    #[test]
    fn rejects_missing_value() {
        let bad = "aa : crc=57 YES\naa\n";
        assert!(matches!(parse_w1_slave(bad), Err(SensorError::Parse { .. })));
        assert!(matches!(parse_w1_slave(""), Err(SensorError::Parse { .. })));
    }

    #[test]
    fn rejects_non_finite_value() {
        for raw in ["nan", "inf", "-inf", "NaN"] {
            let garbled = format!("aa : crc=57 YES\naa t={raw}\n");
            assert!(
                matches!(parse_w1_slave(&garbled), Err(SensorError::Parse { .. })),
                "accepted t={raw}"
            );
        }
    }

    #[test]
    fn ph_conversion() {
        assert!((ph_from_voltage(2.5) - 7.0).abs() < 1e-12);
        // 3.4 V reads 2.0
        assert!((ph_from_voltage(3.4) - 2.0).abs() < 1e-9);
        assert_eq!(ph_from_voltage(10.0), 0.0);
        assert_eq!(ph_from_voltage(-5.0), 14.0);
    }

    #[test]
    fn co2_conversion() {
        assert!((co2_ppm_from_voltage(1.5) - 1500.0).abs() < 1e-9);
    }
}
