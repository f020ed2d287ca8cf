//! Persisted data schema.

use chrono::NaiveDate;
use kb_core::Real;
use kb_model::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Everything the logbook keeps on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataFile {
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Open vessel, sugar turning into acids.
    #[default]
    Primary,
    /// Sealed bottles, pressure building.
    Secondary,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub tea_type: String,
    pub sugar_g: Real,
    pub volume_l: Real,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottling: Option<Bottling>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Batch {
    pub fn new(
        name: impl Into<String>,
        tea_type: impl Into<String>,
        sugar_g: Real,
        volume_l: Real,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tea_type: tea_type.into(),
            sugar_g,
            volume_l,
            start_date,
            phase: Phase::Primary,
            bottling: None,
            measurements: Vec::new(),
        }
    }

    /// Start of the current phase: brew day in primary, bottling day in secondary.
    pub fn phase_start(&self) -> NaiveDate {
        match (self.phase, &self.bottling) {
            (Phase::Secondary, Some(bottling)) => bottling.date,
            _ => self.start_date,
        }
    }

    /// Whole days elapsed in the current phase on `date`. Negative before the phase began.
    pub fn days_in_phase(&self, date: NaiveDate) -> i64 {
        (date - self.phase_start()).num_days()
    }

    /// Most recent measurement by date; the later entry wins a same-day tie.
    pub fn latest_measurement(&self) -> Option<&Measurement> {
        self.measurements.iter().max_by_key(|m| m.date)
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bottling {
    pub date: NaiveDate,
    pub bottle_type: String,
    #[serde(default)]
    pub added_sugar_g_per_l: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavoring: Option<String>,
}

/// A reading plus the engine outputs derived from it. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub date: NaiveDate,
    pub temperature_c: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<Real>,
    /// Free-form fizz description, used in secondary instead of pH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbonation: Option<String>,
    pub phase: Phase,
    pub co2_g: Real,
    pub completion_pct: Real,
    pub pressure_atm: Real,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertCadence {
    #[default]
    Always,
    Daily,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub show_alerts: bool,
    pub alert_check: AlertCadence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_alert_check: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            show_alerts: true,
            alert_check: AlertCadence::Always,
            last_alert_check: None,
        }
    }
}
