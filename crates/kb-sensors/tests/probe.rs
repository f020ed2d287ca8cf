//! Probing and hardware fallback against a fake one-wire sysfs tree.

use kb_core::{Real, in_degc};
use kb_sensors::{
    AnalogChannel, HardwareSource, OneWireThermometer, ProbeConfig, ReadingOrigin, ReadingSource,
    SensorError, SensorResult, SimulatedSource, probe,
};
use std::fs;
use std::path::Path;

fn write_device(root: &Path, id: &str, content: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("w1_slave"), content).unwrap();
}

const READING: &str = "4b 01 4b 46 7f ff 05 10 e1 : crc=e1 YES\n4b 01 4b 46 7f ff 05 10 e1 t=20687\n";

struct FixedVolts(Real);

impl AnalogChannel for FixedVolts {
    fn voltage(&mut self) -> SensorResult<Real> {
        Ok(self.0)
    }
}

struct DeadChannel;

impl AnalogChannel for DeadChannel {
    fn voltage(&mut self) -> SensorResult<Real> {
        Err(SensorError::Channel {
            message: "i2c timeout".to_string(),
        })
    }
}

#[test]
fn probe_selects_thermometer_when_present() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "w1_bus_master1", "");
    write_device(tmp.path(), "28-0316a2795bff", READING);

    let config = ProbeConfig {
        one_wire_root: tmp.path().to_path_buf(),
        force_simulation: false,
        seed: Some(3),
    };
    let mut source = probe(&config);
    // pH and CO₂ have no probe attached, so they stay simulated.
    assert_eq!(source.origin(), ReadingOrigin::Mixed);

    let reading = source.read().unwrap();
    assert!((reading.temperature_c() - 20.687).abs() < 1e-9);
}

#[test]
fn probe_falls_back_to_simulation() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ProbeConfig {
        one_wire_root: tmp.path().join("missing"),
        ..ProbeConfig::default()
    };
    assert_eq!(probe(&config).origin(), ReadingOrigin::Simulated);
}

#[test]
fn forced_simulation_ignores_hardware() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-0000", READING);
    let config = ProbeConfig {
        one_wire_root: tmp.path().to_path_buf(),
        force_simulation: true,
        seed: Some(1),
    };
    assert_eq!(probe(&config).origin(), ReadingOrigin::Simulated);
}

#[test]
fn failed_thermometer_read_uses_simulated_value() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-0001", "00 : crc=00 NO\n00 t=99999\n");
    let thermometer = OneWireThermometer::discover(tmp.path()).unwrap();
    let mut source = HardwareSource::new(Some(thermometer), SimulatedSource::seeded(5).at_hour(12));

    let t = in_degc(source.temperature().unwrap());
    assert!((20.0..=28.0).contains(&t), "fallback temperature {t}");
}

#[test]
fn garbled_thermometer_value_uses_simulated_value() {
    for garbled in ["t=inf", "t=nan", "t=-inf"] {
        let tmp = tempfile::tempdir().unwrap();
        write_device(tmp.path(), "28-0001", &format!("aa : crc=aa YES\naa {garbled}\n"));
        let thermometer = OneWireThermometer::discover(tmp.path()).unwrap();
        let mut source =
            HardwareSource::new(Some(thermometer), SimulatedSource::seeded(2).at_hour(12));

        let t = source.read().unwrap().temperature_c();
        assert!(t.is_finite(), "{garbled} leaked through as {t}");
        assert!((20.0..=28.0).contains(&t), "fallback temperature {t}");
    }
}

#[test]
fn origin_reflects_attached_hardware() {
    let tmp = tempfile::tempdir().unwrap();
    write_device(tmp.path(), "28-0002", READING);
    let thermometer = OneWireThermometer::discover(tmp.path()).unwrap();

    let full = HardwareSource::new(Some(thermometer), SimulatedSource::seeded(4))
        .with_ph_channel(Box::new(FixedVolts(2.5)))
        .with_co2_channel(Box::new(FixedVolts(1.2)));
    assert_eq!(full.origin(), ReadingOrigin::Hardware);

    let bare = HardwareSource::new(None, SimulatedSource::seeded(4));
    assert_eq!(bare.origin(), ReadingOrigin::Simulated);
}

#[test]
fn analog_channels_convert_and_fall_back() {
    let mut source = HardwareSource::new(None, SimulatedSource::seeded(9))
        .with_ph_channel(Box::new(FixedVolts(2.86)))
        .with_co2_channel(Box::new(DeadChannel));

    assert!((source.ph().unwrap() - 5.0).abs() < 1e-9);
    let co2 = source.co2_ppm().unwrap();
    assert!((1_000.0..=5_000.0).contains(&co2));
}
