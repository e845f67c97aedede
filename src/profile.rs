//! Elevation profile derivation.
//!
//! Turns a raw trail track into the chart-ready profile sequence: cumulative
//! haversine mileage, smoothed elevation in feet, per-segment grade, and
//! threshold-filtered cumulative gain/loss.
//!
//! The whole profile is recomputed when the track changes; there is no
//! incremental mutation. Derivation is pure and idempotent, so hosts are free
//! to memoize results keyed by a dataset version tag.
//!
//! ## Threshold-filtered gain/loss
//!
//! Matching the convention used by consumer GPS apps, elevation deltas only
//! count toward cumulative gain/loss once they exceed a noise floor
//! (default 10 ft) relative to the last counted elevation. Smaller wiggles
//! are jitter, not climbing.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::geo_utils::{haversine_distance, meters_to_feet, meters_to_miles};
use crate::smoothing::{smooth_elevations, DEFAULT_SMOOTHING_WINDOW};
use crate::TrailPoint;

/// Default gain/loss noise threshold in feet.
pub const DEFAULT_GAIN_THRESHOLD_FT: f64 = 10.0;

/// Configuration for profile derivation.
///
/// The defaults reproduce the dashboard's empirical constants; both knobs are
/// tunable for other sensors or datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Moving-average window width in samples.
    /// Default: 5
    pub smoothing_window: usize,

    /// Elevation noise threshold for gain/loss accumulation, in feet.
    /// Default: 10.0
    pub gain_threshold_ft: f64,
}

impl ProfileConfig {
    /// Create a config with explicit smoothing window and threshold.
    pub fn new(smoothing_window: usize, gain_threshold_ft: f64) -> Self {
        Self {
            smoothing_window,
            gain_threshold_ft,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_window < 1 {
            return Err(ProfileError::config("smoothing window must be >= 1"));
        }
        if !self.gain_threshold_ft.is_finite() || self.gain_threshold_ft < 0.0 {
            return Err(ProfileError::config(
                "gain threshold must be a finite value >= 0 ft",
            ));
        }
        Ok(())
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            gain_threshold_ft: DEFAULT_GAIN_THRESHOLD_FT,
        }
    }
}

/// One entry in the derived, chart-ready profile sequence.
///
/// The sequence has exactly one point per raw trail point, in track order;
/// `distance_miles` is non-decreasing and the cumulative counters are
/// monotonic. `source` is a copy of the raw point at the same index, kept for
/// map↔chart hover synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Cumulative great-circle distance from the first raw point, in miles
    pub distance_miles: f64,
    /// Smoothed elevation at this index, in feet
    pub elevation_ft: f64,
    /// Signed grade between this point and the previous one, in percent
    /// (0 for the first point and for zero-length segments)
    pub grade_percent: f64,
    /// Running threshold-filtered elevation gain, in feet
    pub cumulative_gain_ft: f64,
    /// Running threshold-filtered elevation loss, in feet (absolute value)
    pub cumulative_loss_ft: f64,
    /// The raw trail point this entry was derived from
    pub source: TrailPoint,
}

/// Derive the full elevation profile for a track.
///
/// Smooths the raw elevations with the configured window, then runs
/// [`build_profile_from_smoothed`]. Empty tracks yield an empty profile; a
/// single-point track yields one point at distance 0 with zeroed stats.
pub fn build_profile(track: &[TrailPoint], config: &ProfileConfig) -> Vec<ProfilePoint> {
    let smoothed = smooth_elevations(track, config.smoothing_window);
    build_profile_from_smoothed(track, &smoothed, config.gain_threshold_ft)
}

/// Derive the profile from a track and its pre-smoothed elevation series.
///
/// `smoothed_m` must be positionally aligned with `track` (same length, same
/// order, meters). The threshold applies in feet, after conversion.
pub fn build_profile_from_smoothed(
    track: &[TrailPoint],
    smoothed_m: &[f64],
    gain_threshold_ft: f64,
) -> Vec<ProfilePoint> {
    debug_assert_eq!(track.len(), smoothed_m.len());
    if track.is_empty() || smoothed_m.len() != track.len() {
        return Vec::new();
    }

    let smoothed_ft: Vec<f64> = smoothed_m.iter().map(|&m| meters_to_feet(m)).collect();

    let mut profile = Vec::with_capacity(track.len());
    profile.push(ProfilePoint {
        distance_miles: 0.0,
        elevation_ft: smoothed_ft[0],
        grade_percent: 0.0,
        cumulative_gain_ft: 0.0,
        cumulative_loss_ft: 0.0,
        source: track[0],
    });

    let mut total_dist_m = 0.0;
    let mut cumulative_gain = 0.0;
    let mut cumulative_loss = 0.0;
    let mut last_counted_ft = smoothed_ft[0];

    for i in 1..track.len() {
        let segment_m = haversine_distance(&track[i - 1], &track[i]);
        total_dist_m += segment_m;

        // Gain/loss only move once the delta clears the noise threshold,
        // measured against the last elevation that counted
        let threshold_delta = smoothed_ft[i] - last_counted_ft;
        if threshold_delta.abs() >= gain_threshold_ft {
            if threshold_delta > 0.0 {
                cumulative_gain += threshold_delta;
            } else {
                cumulative_loss += threshold_delta.abs();
            }
            last_counted_ft = smoothed_ft[i];
        }

        let rise_ft = smoothed_ft[i] - smoothed_ft[i - 1];
        let run_ft = meters_to_feet(segment_m);
        let grade_percent = if run_ft > 0.0 {
            (rise_ft / run_ft) * 100.0
        } else {
            // Coincident points happen in real GPX pulls; grade is defined as
            // flat there rather than a division error
            0.0
        };

        profile.push(ProfilePoint {
            distance_miles: meters_to_miles(total_dist_m),
            elevation_ft: smoothed_ft[i],
            grade_percent,
            cumulative_gain_ft: cumulative_gain,
            cumulative_loss_ft: cumulative_loss,
            source: track[i],
        });
    }

    profile
}

/// Downsample a profile for display or overlay export.
///
/// Keeps the first point, every `sample_rate`-th point, and the last point,
/// preserving the overall shape while shrinking payload size. A rate of 1
/// clones the profile. Returns a `ConfigError` for a rate of 0.
pub fn downsample_profile(profile: &[ProfilePoint], sample_rate: usize) -> Result<Vec<ProfilePoint>> {
    if sample_rate == 0 {
        return Err(ProfileError::config("sample rate must be >= 1"));
    }
    if profile.len() <= 2 || sample_rate == 1 {
        return Ok(profile.to_vec());
    }

    let last = profile.len() - 1;
    Ok(profile
        .iter()
        .enumerate()
        .filter(|(i, _)| *i == 0 || *i == last || i % sample_rate == 0)
        .map(|(_, p)| p.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0.01 degrees of latitude is ~1,112 m on the haversine sphere
    fn climb_track() -> Vec<TrailPoint> {
        vec![
            TrailPoint::new(-121.65, 41.00, 900.0),
            TrailPoint::new(-121.65, 41.01, 910.0),
            TrailPoint::new(-121.65, 41.02, 925.0),
            TrailPoint::new(-121.65, 41.03, 915.0),
            TrailPoint::new(-121.65, 41.04, 940.0),
        ]
    }

    #[test]
    fn test_length_invariant() {
        let track = climb_track();
        let profile = build_profile(&track, &ProfileConfig::default());
        assert_eq!(profile.len(), track.len());
    }

    #[test]
    fn test_first_point_zeroed() {
        let profile = build_profile(&climb_track(), &ProfileConfig::default());
        assert_eq!(profile[0].distance_miles, 0.0);
        assert_eq!(profile[0].grade_percent, 0.0);
        assert_eq!(profile[0].cumulative_gain_ft, 0.0);
        assert_eq!(profile[0].cumulative_loss_ft, 0.0);
    }

    #[test]
    fn test_monotonic_distance_and_counters() {
        let profile = build_profile(&climb_track(), &ProfileConfig::default());
        for pair in profile.windows(2) {
            assert!(pair[1].distance_miles >= pair[0].distance_miles);
            assert!(pair[1].cumulative_gain_ft >= pair[0].cumulative_gain_ft);
            assert!(pair[1].cumulative_loss_ft >= pair[0].cumulative_loss_ft);
        }
    }

    #[test]
    fn test_single_point_trail() {
        let track = vec![TrailPoint::new(-121.0, 41.0, 900.0)];
        let profile = build_profile(&track, &ProfileConfig::default());

        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].distance_miles, 0.0);
        assert_eq!(profile[0].cumulative_gain_ft, 0.0);
        assert_eq!(profile[0].cumulative_loss_ft, 0.0);
        assert!((profile[0].elevation_ft - 900.0 * 3.28084).abs() < 1e-9);
    }

    #[test]
    fn test_empty_track() {
        assert!(build_profile(&[], &ProfileConfig::default()).is_empty());
    }

    #[test]
    fn test_source_alignment() {
        let track = climb_track();
        let profile = build_profile(&track, &ProfileConfig::default());
        for (point, raw) in profile.iter().zip(track.iter()) {
            assert_eq!(point.source, *raw);
        }
    }

    #[test]
    fn test_grade_on_known_climb() {
        // 100 m horizontal, 10 m rise -> 10% grade. Window 1 disables
        // smoothing so the rise survives intact.
        let step_deg = 100.0 / 111_194.93;
        let track = vec![
            TrailPoint::new(-121.65, 41.0, 900.0),
            TrailPoint::new(-121.65, 41.0 + step_deg, 910.0),
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        assert!((profile[1].grade_percent - 10.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_distance_segment_grade_is_zero() {
        let track = vec![
            TrailPoint::new(-121.65, 41.0, 900.0),
            TrailPoint::new(-121.65, 41.0, 920.0),
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        assert_eq!(profile[1].grade_percent, 0.0);
        assert_eq!(profile[1].distance_miles, profile[0].distance_miles);
    }

    #[test]
    fn test_threshold_counts_large_deltas_only() {
        // Elevations 3000 -> 3020 -> 3017 -> 3037 ft (window 1). The -3 ft
        // dip is jitter and must not move either counter; the final climb is
        // measured from the last counted elevation (3020), so gain is
        // 20 + 17 = 37 ft.
        let ft = |feet: f64| feet / 3.28084;
        let track = vec![
            TrailPoint::new(-121.65, 41.00, ft(3000.0)),
            TrailPoint::new(-121.65, 41.01, ft(3020.0)),
            TrailPoint::new(-121.65, 41.02, ft(3017.0)),
            TrailPoint::new(-121.65, 41.03, ft(3037.0)),
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));

        let last = profile.last().unwrap();
        assert!((last.cumulative_gain_ft - 37.0).abs() < 0.5);
        assert_eq!(last.cumulative_loss_ft, 0.0);
    }

    #[test]
    fn test_threshold_resets_reference() {
        // A slow 4 ft/step descent still accumulates: each step is below the
        // threshold alone, but deltas are measured from the last counted
        // elevation, so every third step trips it.
        let ft = |feet: f64| feet / 3.28084;
        let track: Vec<TrailPoint> = (0..10)
            .map(|i| TrailPoint::new(-121.65, 41.0 + i as f64 * 0.01, ft(3000.0 - 4.0 * i as f64)))
            .collect();
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));

        let last = profile.last().unwrap();
        assert_eq!(last.cumulative_gain_ft, 0.0);
        // 36 ft total drop, counted in 12 ft increments: 3 triggers = 36 ft
        assert!((last.cumulative_loss_ft - 36.0).abs() < 0.5);
    }

    #[test]
    fn test_idempotence() {
        let track = climb_track();
        let config = ProfileConfig::default();
        let first = build_profile(&track, &config);
        let second = build_profile(&track, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_validation() {
        assert!(ProfileConfig::default().validate().is_ok());
        assert!(ProfileConfig::new(0, 10.0).validate().is_err());
        assert!(ProfileConfig::new(5, -1.0).validate().is_err());
        assert!(ProfileConfig::new(5, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_downsample_keeps_endpoints() {
        let track: Vec<TrailPoint> = (0..101)
            .map(|i| TrailPoint::new(-121.65, 41.0 + i as f64 * 0.001, 900.0 + i as f64))
            .collect();
        let profile = build_profile(&track, &ProfileConfig::default());
        let sampled = downsample_profile(&profile, 10).unwrap();

        assert_eq!(sampled.first().unwrap(), profile.first().unwrap());
        assert_eq!(sampled.last().unwrap(), profile.last().unwrap());
        assert!(sampled.len() < profile.len());
        assert!(downsample_profile(&profile, 0).is_err());
    }
}
