//! Aggregate trail statistics for the summary stat cards.

use serde::{Deserialize, Serialize};

use crate::ProfilePoint;

/// Base pace for a loaded hiker, in miles per hour.
pub const LOADED_PACE_MPH: f64 = 2.5;

/// Feet of cumulative gain that cost one extra hour of moving time.
pub const GAIN_FEET_PER_EXTRA_HOUR: f64 = 1500.0;

/// Aggregate statistics over a derived profile.
///
/// An empty profile yields the all-zero default rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Total trail distance in miles
    pub total_miles: f64,
    /// Threshold-filtered cumulative gain in feet
    pub total_gain_ft: f64,
    /// Threshold-filtered cumulative loss in feet
    pub total_loss_ft: f64,
    /// Highest smoothed elevation in feet
    pub high_point_ft: f64,
    /// Lowest smoothed elevation in feet
    pub low_point_ft: f64,
    /// Mean absolute grade across all points, in percent
    pub average_abs_grade_percent: f64,
    /// Estimated moving time for a loaded hiker, in hours
    pub estimated_moving_time_hours: f64,
}

/// Estimated moving time in hours for a loaded hiker.
///
/// A fixed empirical pacing model (a Naismith-style rule tuned for full
/// packs): 2.5 mph base pace plus one hour per 1,500 ft of cumulative gain.
#[inline]
pub fn estimated_moving_time_hours(total_miles: f64, total_gain_ft: f64) -> f64 {
    total_miles / LOADED_PACE_MPH + total_gain_ft / GAIN_FEET_PER_EXTRA_HOUR
}

/// Compute aggregate statistics for a profile.
pub fn compute_stats(profile: &[ProfilePoint]) -> ProfileStats {
    let last = match profile.last() {
        Some(point) => point,
        None => return ProfileStats::default(),
    };

    let mut high = f64::MIN;
    let mut low = f64::MAX;
    let mut grade_sum = 0.0;
    let mut grade_count = 0usize;

    for point in profile {
        high = high.max(point.elevation_ft);
        low = low.min(point.elevation_ft);

        // Grade can be NaN on degenerate data fed through the two-argument
        // builder; keep the average robust to it
        if point.grade_percent.is_finite() {
            grade_sum += point.grade_percent.abs();
            grade_count += 1;
        }
    }

    let average_abs_grade_percent = if grade_count > 0 {
        grade_sum / grade_count as f64
    } else {
        0.0
    };

    ProfileStats {
        total_miles: last.distance_miles,
        total_gain_ft: last.cumulative_gain_ft,
        total_loss_ft: last.cumulative_loss_ft,
        high_point_ft: high,
        low_point_ft: low,
        average_abs_grade_percent,
        estimated_moving_time_hours: estimated_moving_time_hours(
            last.distance_miles,
            last.cumulative_gain_ft,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_profile, ProfileConfig, TrailPoint};

    #[test]
    fn test_empty_profile_zero_stats() {
        assert_eq!(compute_stats(&[]), ProfileStats::default());
    }

    #[test]
    fn test_pacing_model() {
        // 52 mi with 6,419' of gain: 20.8 h of walking + 4.28 h of climbing
        let hours = estimated_moving_time_hours(52.0, 6419.0);
        assert!((hours - 25.08).abs() < 0.1);
    }

    #[test]
    fn test_stats_from_profile() {
        let track = vec![
            TrailPoint::new(-121.65, 41.00, 900.0),
            TrailPoint::new(-121.65, 41.01, 950.0),
            TrailPoint::new(-121.65, 41.02, 1000.0),
            TrailPoint::new(-121.65, 41.03, 940.0),
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        let stats = compute_stats(&profile);

        let last = profile.last().unwrap();
        assert_eq!(stats.total_miles, last.distance_miles);
        assert_eq!(stats.total_gain_ft, last.cumulative_gain_ft);
        assert_eq!(stats.total_loss_ft, last.cumulative_loss_ft);

        // 1000 m high point, 900 m low point, in feet
        assert!((stats.high_point_ft - 1000.0 * 3.28084).abs() < 1e-6);
        assert!((stats.low_point_ft - 900.0 * 3.28084).abs() < 1e-6);
        assert!(stats.average_abs_grade_percent > 0.0);
        assert!(
            (stats.estimated_moving_time_hours
                - estimated_moving_time_hours(stats.total_miles, stats.total_gain_ft))
            .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_nan_grades_filtered() {
        let track = vec![
            TrailPoint::new(-121.65, 41.00, 900.0),
            TrailPoint::new(-121.65, 41.01, 950.0),
        ];
        let mut profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        profile[1].grade_percent = f64::NAN;

        let stats = compute_stats(&profile);
        // Only the first point's 0% grade remains
        assert_eq!(stats.average_abs_grade_percent, 0.0);
    }
}
