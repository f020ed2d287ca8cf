//! Over-carbonation alert scanning across the logbook.

use crate::logbook::Logbook;
use crate::schema::{AlertCadence, Batch, Settings};
use chrono::NaiveDate;
use kb_model::{AlertEntry, Thresholds, rank_alerts};

/// Whether the configured cadence calls for a check on `today`.
pub fn should_check_alerts(settings: &Settings, today: NaiveDate) -> bool {
    if !settings.show_alerts {
        return false;
    }
    match settings.alert_check {
        AlertCadence::Always => true,
        AlertCadence::Daily => settings.last_alert_check != Some(today),
        AlertCadence::Never => false,
    }
}

/// Ranked alerts from each batch's latest measurement, ignoring cadence.
pub fn latest_alerts<'a>(
    batches: impl IntoIterator<Item = &'a Batch>,
    thresholds: &Thresholds,
) -> Vec<AlertEntry> {
    let entries = batches.into_iter().filter_map(|batch| {
        batch
            .latest_measurement()
            .map(|m| AlertEntry::new(batch.name.clone(), m.pressure_atm, thresholds))
    });
    rank_alerts(entries)
}

/// Run a cadence-gated alert check, recording the check day for daily cadence.
pub fn check_alerts(logbook: &mut Logbook, today: NaiveDate) -> Vec<AlertEntry> {
    if !should_check_alerts(logbook.settings(), today) {
        return Vec::new();
    }
    if logbook.settings().alert_check == AlertCadence::Daily {
        logbook.settings_mut().last_alert_check = Some(today);
    }

    let thresholds = logbook.settings().thresholds;
    let alerts = latest_alerts(logbook.batches(), &thresholds);
    if !alerts.is_empty() {
        tracing::warn!(count = alerts.len(), "batches at risk of over-carbonation");
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logbook::MeasurementInput;
    use kb_model::RiskLevel;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn measure(log: &mut Logbook, name: &str, date: NaiveDate, temperature_c: f64) {
        log.record_measurement(
            name,
            MeasurementInput {
                date,
                temperature_c,
                ph: None,
                carbonation: None,
            },
        )
        .unwrap();
    }

    fn busy_logbook() -> Logbook {
        let mut log = Logbook::default();
        log.add_batch(Batch::new("Mild", "green", 100.0, 1.0, day(1))).unwrap();
        log.add_batch(Batch::new("Lively", "black", 200.0, 1.0, day(1))).unwrap();
        log.add_batch(Batch::new("Fierce", "black", 300.0, 1.0, day(1))).unwrap();
        log.add_batch(Batch::new("Unmeasured", "oolong", 300.0, 1.0, day(1))).unwrap();

        // 100 g, 21 days: 0.95 atm
        measure(&mut log, "Mild", day(22), 25.0);
        // 200 g, 14 days: 1.8 atm; the backdated entry after it is not the latest
        measure(&mut log, "Lively", day(15), 25.0);
        measure(&mut log, "Lively", day(5), 25.0);
        // 300 g, 14 days: 2.7 atm
        measure(&mut log, "Fierce", day(15), 25.0);
        log
    }

    #[test]
    fn latest_measurement_drives_ranking() {
        let log = busy_logbook();
        let alerts = latest_alerts(log.batches(), &log.settings().thresholds);
        let summary: Vec<(&str, RiskLevel)> =
            alerts.iter().map(|a| (a.name.as_str(), a.level)).collect();
        assert_eq!(
            summary,
            [("Fierce", RiskLevel::Danger), ("Lively", RiskLevel::Warning)]
        );
    }

    #[test]
    fn daily_cadence_checks_once_per_day() {
        let mut log = busy_logbook();
        let mut settings = log.settings().clone();
        settings.alert_check = AlertCadence::Daily;
        log.update_settings(settings);

        assert!(!check_alerts(&mut log, day(30)).is_empty());
        assert_eq!(log.settings().last_alert_check, Some(day(30)));
        assert!(check_alerts(&mut log, day(30)).is_empty());
        assert!(!check_alerts(&mut log, day(31)).is_empty());
    }

    #[test]
    fn disabled_alerts_yield_nothing() {
        let mut log = busy_logbook();
        let mut settings = log.settings().clone();
        settings.alert_check = AlertCadence::Never;
        log.update_settings(settings.clone());
        assert!(check_alerts(&mut log, day(30)).is_empty());

        settings.alert_check = AlertCadence::Always;
        settings.show_alerts = false;
        log.update_settings(settings);
        assert!(check_alerts(&mut log, day(30)).is_empty());
    }
}
