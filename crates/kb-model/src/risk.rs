//! Over-carbonation risk classification.

use crate::error::{ModelError, ModelResult};
use kb_core::Real;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity of a pressure estimate. Ordered `Safe < Warning < Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
        })
    }
}

/// Pressure thresholds in atmospheres, with `warning_atm < danger_atm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    warning_atm: Real,
    danger_atm: Real,
}

#[derive(Deserialize)]
struct RawThresholds {
    warning_atm: Real,
    danger_atm: Real,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = ModelError;

    fn try_from(raw: RawThresholds) -> ModelResult<Self> {
        Thresholds::new(raw.warning_atm, raw.danger_atm)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_atm: 1.5,
            danger_atm: 2.5,
        }
    }
}

impl Thresholds {
    /// Create a validated threshold pair.
    pub fn new(warning_atm: Real, danger_atm: Real) -> ModelResult<Self> {
        if !warning_atm.is_finite() || !danger_atm.is_finite() {
            return Err(ModelError::InvalidArg {
                what: "thresholds must be finite",
            });
        }
        if warning_atm < 0.0 {
            return Err(ModelError::InvalidArg {
                what: "warning threshold must be non-negative",
            });
        }
        if warning_atm >= danger_atm {
            return Err(ModelError::ThresholdOrder {
                warning_atm,
                danger_atm,
            });
        }
        Ok(Self {
            warning_atm,
            danger_atm,
        })
    }

    pub fn warning_atm(&self) -> Real {
        self.warning_atm
    }

    pub fn danger_atm(&self) -> Real {
        self.danger_atm
    }

    /// Classify a pressure. Boundary values fall into the higher severity.
    pub fn classify(&self, pressure_atm: Real) -> RiskLevel {
        if pressure_atm >= self.danger_atm {
            RiskLevel::Danger
        } else if pressure_atm >= self.warning_atm {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }
}

/// One batch's latest pressure and its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub name: String,
    pub pressure_atm: Real,
    pub level: RiskLevel,
}

impl AlertEntry {
    pub fn new(name: impl Into<String>, pressure_atm: Real, thresholds: &Thresholds) -> Self {
        Self {
            name: name.into(),
            pressure_atm,
            level: thresholds.classify(pressure_atm),
        }
    }
}

/// Keep only at-risk entries, most severe first, then highest pressure first.
pub fn rank_alerts(entries: impl IntoIterator<Item = AlertEntry>) -> Vec<AlertEntry> {
    let mut at_risk: Vec<AlertEntry> = entries
        .into_iter()
        .filter(|e| e.level > RiskLevel::Safe)
        .collect();
    at_risk.sort_by(|a, b| match b.level.cmp(&a.level) {
        Ordering::Equal => b.pressure_atm.total_cmp(&a.pressure_atm),
        other => other,
    });
    at_risk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_labels_pad_to_width() {
        assert_eq!(format!("[{:<8}]", RiskLevel::Safe), "[Safe    ]");
        assert_eq!(format!("[{:>7}]", RiskLevel::Danger), "[ Danger]");
    }

    #[test]
    fn boundaries_round_up() {
        let t = Thresholds::new(1.5, 2.5).unwrap();
        assert_eq!(t.classify(2.5), RiskLevel::Danger);
        assert_eq!(t.classify(1.5), RiskLevel::Warning);
        assert_eq!(t.classify(1.499), RiskLevel::Safe);
        assert_eq!(t.classify(2.499), RiskLevel::Warning);
        assert_eq!(t.classify(0.0), RiskLevel::Safe);
    }

    #[test]
    fn rejects_unordered_thresholds() {
        assert!(matches!(
            Thresholds::new(2.5, 2.5),
            Err(ModelError::ThresholdOrder { .. })
        ));
        assert!(Thresholds::new(3.0, 2.0).is_err());
        assert!(Thresholds::new(-0.1, 2.0).is_err());
        assert!(Thresholds::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialize_validates_order() {
        let ok: Thresholds =
            serde_json::from_str(r#"{"warning_atm":1.0,"danger_atm":2.0}"#).unwrap();
        assert_eq!(ok.danger_atm(), 2.0);
        let bad = serde_json::from_str::<Thresholds>(r#"{"warning_atm":2.0,"danger_atm":1.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn ranking_orders_by_severity_then_pressure() {
        let t = Thresholds::default();
        let ranked = rank_alerts([
            AlertEntry::new("calm", 0.4, &t),
            AlertEntry::new("fizzy", 1.6, &t),
            AlertEntry::new("loud", 2.6, &t),
            AlertEntry::new("fizzier", 2.1, &t),
            AlertEntry::new("louder", 3.9, &t),
        ]);
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["louder", "loud", "fizzier", "fizzy"]);
    }
}
