//! Data file persistence and export against a temporary directory.

use chrono::NaiveDate;
use kb_model::Thresholds;
use kb_store::{
    AlertCadence, Batch, Bottling, JsonStore, MeasurementInput, Phase, Settings, StoreError,
    write_comparison_csv, write_measurements_csv,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn missing_file_loads_empty_logbook() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonStore::new(tmp.path().join("absent.json"));
    let log = store.load().unwrap();
    assert!(log.batches().is_empty());
    assert_eq!(log.settings().thresholds, Thresholds::default());
}

#[test]
fn new_file_starts_with_configured_settings() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("fresh.json");
    let defaults = Settings {
        thresholds: Thresholds::new(1.0, 2.0).unwrap(),
        ..Settings::default()
    };
    let store = JsonStore::new(&path).with_default_settings(defaults.clone());

    let log = store.load().unwrap();
    assert_eq!(log.settings(), &defaults);

    // Once the file exists its own settings win over the defaults.
    store.save(log.data()).unwrap();
    let other = JsonStore::new(&path);
    assert_eq!(other.load().unwrap().settings().thresholds, defaults.thresholds);
}

#[test]
fn save_and_reload_preserves_everything() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonStore::new(tmp.path().join("nested").join("data.json"));

    let mut log = store.load().unwrap();
    log.add_batch(Batch::new("Earl Grey", "black", 180.0, 3.0, day(1)))
        .unwrap();
    log.record_measurement(
        "earl grey",
        MeasurementInput {
            date: day(8),
            temperature_c: 26.5,
            ph: Some(3.2),
            carbonation: None,
        },
    )
    .unwrap();
    log.move_to_secondary(
        "Earl Grey",
        Bottling {
            date: day(9),
            bottle_type: "swing-top".to_string(),
            added_sugar_g_per_l: 6.0,
            flavoring: Some("lemon, ginger".to_string()),
        },
    )
    .unwrap();

    let mut settings = log.settings().clone();
    settings.thresholds = Thresholds::new(1.2, 2.0).unwrap();
    settings.alert_check = AlertCadence::Daily;
    log.update_settings(settings);

    store.save(log.data()).unwrap();
    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.settings(), log.settings());

    let original = log.find("Earl Grey").unwrap();
    let batch = reloaded.find("EARL GREY").unwrap();
    assert_eq!(batch.id, original.id);
    assert_eq!(batch.phase, Phase::Secondary);
    assert_eq!(batch.bottling, original.bottling);
    assert_eq!(batch.measurements.len(), 1);

    let (a, b) = (&original.measurements[0], &batch.measurements[0]);
    assert_eq!(a.date, b.date);
    assert_eq!(a.phase, Phase::Primary);
    assert!((a.co2_g - b.co2_g).abs() < 1e-9);
    assert!((a.pressure_atm - b.pressure_atm).abs() < 1e-12);
}

#[test]
fn corrupt_file_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        JsonStore::new(&path).load(),
        Err(StoreError::Json(_))
    ));
}

#[test]
fn unordered_thresholds_on_disk_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"batches": [], "settings": {"thresholds": {"warning_atm": 3.0, "danger_atm": 2.0}}}"#,
    )
    .unwrap();
    assert!(JsonStore::new(&path).load().is_err());
}

#[test]
fn csv_exports() {
    let mut log = kb_store::Logbook::default();
    log.add_batch(Batch::new("Rooibos, spiced", "rooibos", 200.0, 2.0, day(1)))
        .unwrap();
    log.record_measurement(
        "Rooibos, spiced",
        MeasurementInput {
            date: day(15),
            temperature_c: 25.0,
            ph: None,
            carbonation: Some("light".to_string()),
        },
    )
    .unwrap();

    let batch = log.find("rooibos, spiced").unwrap();
    let mut buf = Vec::new();
    write_measurements_csv(batch, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "2024-03-15,primary,25,,light,82.8000,90.00,1.8000"
    );

    let mut buf = Vec::new();
    write_comparison_csv(log.batches(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("\"Rooibos, spiced\",rooibos,200,2,2024-03-01,primary,1,"));
}
