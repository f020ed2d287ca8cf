//! Day-by-day CO₂ projections.
//!
//! Each point is computed independently from its day index, so a projection can be
//! restarted or extended at any day without carrying state forward.

use crate::co2::calculate_co2_production;
use kb_core::Real;
use serde::{Deserialize, Serialize};

/// Days ahead shown by the short-range prediction.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// CO₂ mass estimated for one day of fermentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub day: u32,
    pub co2_g: Real,
}

/// Projection for `day = 0..=days`, always `days + 1` points in ascending order.
pub fn predict_co2_timeline(
    sugar_amount: Real,
    temperature: Real,
    volume: Real,
    days: u32,
) -> Vec<TimelinePoint> {
    project_co2_window(sugar_amount, temperature, volume, 0, days)
}

/// Projection for `day = start_day..=start_day + horizon`.
///
/// Used for the "coming week" outlook of a batch already `start_day` days in.
pub fn project_co2_window(
    sugar_amount: Real,
    temperature: Real,
    volume: Real,
    start_day: u32,
    horizon: u32,
) -> Vec<TimelinePoint> {
    let end_day = start_day.saturating_add(horizon);
    (start_day..=end_day)
        .map(|day| TimelinePoint {
            day,
            co2_g: calculate_co2_production(sugar_amount, Real::from(day), temperature, volume),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_includes_both_ends() {
        let timeline = predict_co2_timeline(200.0, 25.0, 2.0, 2);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].day, 0);
        assert_eq!(timeline[0].co2_g, 0.0);
        assert_eq!(timeline[2].day, 2);
    }

    #[test]
    fn zero_day_timeline_is_single_point() {
        let timeline = predict_co2_timeline(200.0, 25.0, 1.0, 0);
        assert_eq!(timeline, vec![TimelinePoint { day: 0, co2_g: 0.0 }]);
    }

    #[test]
    fn window_matches_full_timeline() {
        let full = predict_co2_timeline(150.0, 27.0, 4.0, 28);
        let window = project_co2_window(150.0, 27.0, 4.0, 10, DEFAULT_WINDOW_DAYS);
        assert_eq!(window.len(), 8);
        assert_eq!(window.first().map(|p| p.day), Some(10));
        assert_eq!(window.last().map(|p| p.day), Some(17));
        for point in &window {
            assert_eq!(*point, full[point.day as usize]);
        }
    }
}
