//! Altitude physiology zones and grade-difficulty classification.
//!
//! The dashboard shades the elevation chart with altitude-risk bands (per
//! Wilderness Medical Society guidance) and colors hover readouts by grade
//! difficulty. Both are tagged-range lookups over ordered record lists, plus
//! distance-weighted distributions over a derived profile.
//!
//! ## Example
//! ```rust
//! use trail_profile::zones::{AltitudeZoneConfig, GradeBucket};
//!
//! let zones = AltitudeZoneConfig::default();
//! assert_eq!(zones.zone_for(5850.0).name, "Moderate Altitude");
//! assert_eq!(GradeBucket::classify(-12.0), GradeBucket::Steep);
//! ```

use serde::{Deserialize, Serialize};

use crate::ProfilePoint;

/// Altitude-related illness risk level for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Moderate,
    High,
}

/// One altitude band: a half-open elevation range `[min_ft, max_ft)` with a
/// display name and risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeZone {
    pub name: String,
    pub min_ft: f64,
    pub max_ft: f64,
    pub risk: RiskLevel,
}

impl AltitudeZone {
    pub fn new(name: &str, min_ft: f64, max_ft: f64, risk: RiskLevel) -> Self {
        Self {
            name: name.to_string(),
            min_ft,
            max_ft,
            risk,
        }
    }

    /// Whether an elevation falls inside this band.
    pub fn contains(&self, elevation_ft: f64) -> bool {
        elevation_ft >= self.min_ft && elevation_ft < self.max_ft
    }
}

/// Ordered altitude zone table.
///
/// The default bands follow the Wilderness Medical Society altitude-illness
/// guidelines the dashboard's legend cites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeZoneConfig {
    pub zones: Vec<AltitudeZone>,
}

impl AltitudeZoneConfig {
    /// Create a config with a custom ordered zone table.
    ///
    /// The table must be non-empty; `Default` provides the standard bands.
    pub fn with_zones(zones: Vec<AltitudeZone>) -> Self {
        debug_assert!(!zones.is_empty());
        Self { zones }
    }

    /// Resolve the zone for an elevation by linear scan over the ordered
    /// bands. Elevations outside every band fall back to the first zone.
    pub fn zone_for(&self, elevation_ft: f64) -> &AltitudeZone {
        self.zones
            .iter()
            .find(|z| z.contains(elevation_ft))
            .unwrap_or(&self.zones[0])
    }

    /// Index of the zone for an elevation, with the same fallback.
    fn zone_index(&self, elevation_ft: f64) -> usize {
        self.zones
            .iter()
            .position(|z| z.contains(elevation_ft))
            .unwrap_or(0)
    }
}

impl Default for AltitudeZoneConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                AltitudeZone::new("Near Sea Level", 0.0, 4000.0, RiskLevel::None),
                AltitudeZone::new("Moderate Altitude", 4000.0, 8000.0, RiskLevel::Low),
                AltitudeZone::new("High Altitude", 8000.0, 12000.0, RiskLevel::Moderate),
                AltitudeZone::new("Very High Altitude", 12000.0, 18000.0, RiskLevel::High),
            ],
        }
    }
}

/// Grade difficulty buckets used by the chart legend and hover readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBucket {
    Easy,
    Moderate,
    Steep,
    Brutal,
}

impl GradeBucket {
    /// Classify a signed grade percentage by its magnitude.
    pub fn classify(grade_percent: f64) -> Self {
        let abs = grade_percent.abs();
        if abs < 5.0 {
            GradeBucket::Easy
        } else if abs < 10.0 {
            GradeBucket::Moderate
        } else if abs < 15.0 {
            GradeBucket::Steep
        } else {
            GradeBucket::Brutal
        }
    }

    /// Display label for the legend.
    pub fn label(&self) -> &'static str {
        match self {
            GradeBucket::Easy => "easy",
            GradeBucket::Moderate => "moderate",
            GradeBucket::Steep => "steep",
            GradeBucket::Brutal => "brutal",
        }
    }

    fn index(&self) -> usize {
        match self {
            GradeBucket::Easy => 0,
            GradeBucket::Moderate => 1,
            GradeBucket::Steep => 2,
            GradeBucket::Brutal => 3,
        }
    }
}

/// Result of altitude zone distribution over a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeDistribution {
    /// Total profile points analyzed
    pub total_samples: u32,
    /// Points in each zone, indexed like the config's zone table
    pub zone_samples: Vec<u32>,
    /// Trail miles spent in each zone
    pub zone_miles: Vec<f64>,
    /// Percentage of total distance in each zone
    pub zone_percentages: Vec<f64>,
    /// Peak smoothed elevation in feet
    pub peak_elevation_ft: f64,
}

/// Result of grade-difficulty distribution over a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDistribution {
    /// Total profile points analyzed
    pub total_samples: u32,
    /// Points in each bucket (easy, moderate, steep, brutal)
    pub bucket_samples: [u32; 4],
    /// Trail miles in each bucket
    pub bucket_miles: [f64; 4],
    /// Percentage of total distance in each bucket
    pub bucket_percentages: [f64; 4],
    /// Steepest absolute grade observed, in percent
    pub max_abs_grade_percent: f64,
}

/// Calculate how much of the trail sits in each altitude zone.
///
/// Each segment's length is attributed to the zone of its endpoint's
/// elevation; the first point contributes a sample but no distance.
pub fn calculate_altitude_distribution(
    profile: &[ProfilePoint],
    config: &AltitudeZoneConfig,
) -> AltitudeDistribution {
    let zone_count = config.zones.len();
    let mut result = AltitudeDistribution {
        total_samples: profile.len() as u32,
        zone_samples: vec![0; zone_count],
        zone_miles: vec![0.0; zone_count],
        zone_percentages: vec![0.0; zone_count],
        peak_elevation_ft: 0.0,
    };
    if profile.is_empty() || zone_count == 0 {
        return result;
    }

    let mut peak = f64::MIN;
    let mut prev_dist = 0.0;
    for (i, point) in profile.iter().enumerate() {
        let zone = config.zone_index(point.elevation_ft);
        result.zone_samples[zone] += 1;
        if i > 0 {
            result.zone_miles[zone] += point.distance_miles - prev_dist;
        }
        prev_dist = point.distance_miles;
        peak = peak.max(point.elevation_ft);
    }
    result.peak_elevation_ft = peak;

    let total_miles: f64 = result.zone_miles.iter().sum();
    if total_miles > 0.0 {
        for i in 0..zone_count {
            result.zone_percentages[i] = result.zone_miles[i] / total_miles * 100.0;
        }
    }

    result
}

/// Calculate the distance-weighted grade-difficulty breakdown of a profile.
pub fn calculate_grade_distribution(profile: &[ProfilePoint]) -> GradeDistribution {
    let mut result = GradeDistribution {
        total_samples: profile.len() as u32,
        bucket_samples: [0; 4],
        bucket_miles: [0.0; 4],
        bucket_percentages: [0.0; 4],
        max_abs_grade_percent: 0.0,
    };
    if profile.is_empty() {
        return result;
    }

    let mut prev_dist = 0.0;
    for (i, point) in profile.iter().enumerate() {
        let bucket = GradeBucket::classify(point.grade_percent).index();
        result.bucket_samples[bucket] += 1;
        if i > 0 {
            result.bucket_miles[bucket] += point.distance_miles - prev_dist;
        }
        prev_dist = point.distance_miles;
        if point.grade_percent.is_finite() {
            result.max_abs_grade_percent = result.max_abs_grade_percent.max(point.grade_percent.abs());
        }
    }

    let total_miles: f64 = result.bucket_miles.iter().sum();
    if total_miles > 0.0 {
        for i in 0..4 {
            result.bucket_percentages[i] = result.bucket_miles[i] / total_miles * 100.0;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_profile, ProfileConfig, TrailPoint};

    #[test]
    fn test_zone_for_boundaries() {
        let zones = AltitudeZoneConfig::default();

        assert_eq!(zones.zone_for(0.0).risk, RiskLevel::None);
        assert_eq!(zones.zone_for(3999.0).risk, RiskLevel::None);
        assert_eq!(zones.zone_for(4000.0).risk, RiskLevel::Low);
        assert_eq!(zones.zone_for(5850.0).name, "Moderate Altitude");
        assert_eq!(zones.zone_for(8000.0).risk, RiskLevel::Moderate);
        assert_eq!(zones.zone_for(13_000.0).risk, RiskLevel::High);
        // Outside every band falls back to the first zone
        assert_eq!(zones.zone_for(25_000.0).risk, RiskLevel::None);
        assert_eq!(zones.zone_for(-50.0).risk, RiskLevel::None);
    }

    #[test]
    fn test_grade_bucket_thresholds() {
        assert_eq!(GradeBucket::classify(0.0), GradeBucket::Easy);
        assert_eq!(GradeBucket::classify(4.9), GradeBucket::Easy);
        assert_eq!(GradeBucket::classify(5.0), GradeBucket::Moderate);
        assert_eq!(GradeBucket::classify(-9.9), GradeBucket::Moderate);
        assert_eq!(GradeBucket::classify(10.0), GradeBucket::Steep);
        assert_eq!(GradeBucket::classify(15.0), GradeBucket::Brutal);
        assert_eq!(GradeBucket::classify(-32.0), GradeBucket::Brutal);
    }

    #[test]
    fn test_altitude_distribution() {
        // ~1,100 m spacing, elevations straddling the 4,000 ft band edge
        let track = vec![
            TrailPoint::new(-121.65, 41.00, 1000.0), // 3,281 ft
            TrailPoint::new(-121.65, 41.01, 1100.0), // 3,609 ft
            TrailPoint::new(-121.65, 41.02, 1300.0), // 4,265 ft
            TrailPoint::new(-121.65, 41.03, 1400.0), // 4,593 ft
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        let dist = calculate_altitude_distribution(&profile, &AltitudeZoneConfig::default());

        assert_eq!(dist.total_samples, 4);
        assert_eq!(dist.zone_samples[0], 2);
        assert_eq!(dist.zone_samples[1], 2);
        assert!((dist.peak_elevation_ft - 1400.0 * 3.28084).abs() < 1e-6);

        let pct_sum: f64 = dist.zone_percentages.iter().sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_grade_distribution() {
        let track = vec![
            TrailPoint::new(-121.65, 41.00, 900.0),
            TrailPoint::new(-121.65, 41.01, 900.0),  // flat -> easy
            TrailPoint::new(-121.65, 41.02, 1000.0), // ~9% -> moderate
            TrailPoint::new(-121.65, 41.03, 1200.0), // ~18% -> brutal
        ];
        let profile = build_profile(&track, &ProfileConfig::new(1, 10.0));
        let dist = calculate_grade_distribution(&profile);

        assert_eq!(dist.total_samples, 4);
        assert_eq!(dist.bucket_samples[0], 2); // first point + flat segment
        assert_eq!(dist.bucket_samples[1], 1);
        assert_eq!(dist.bucket_samples[3], 1);
        assert!(dist.max_abs_grade_percent > 15.0);

        let pct_sum: f64 = dist.bucket_percentages.iter().sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_profile_distributions() {
        let alt = calculate_altitude_distribution(&[], &AltitudeZoneConfig::default());
        assert_eq!(alt.total_samples, 0);
        assert_eq!(alt.peak_elevation_ft, 0.0);

        let grade = calculate_grade_distribution(&[]);
        assert_eq!(grade.total_samples, 0);
    }
}
