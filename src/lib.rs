//! # Trail Profile
//!
//! Elevation-profile derivation and trail statistics for multi-day hike
//! planning dashboards.
//!
//! This library turns a raw, noisy 3D GPS polyline into a smoothed,
//! distance-indexed elevation profile plus the derived layers a planning
//! dashboard consumes:
//! - Moving-average elevation smoothing to suppress GPS noise
//! - Cumulative haversine mileage, per-segment grade, threshold-filtered
//!   gain/loss accumulation
//! - Mile-indexed elevation lookups for marker placement and hover readouts
//! - Aggregate statistics (distance, gain/loss, high/low point, pacing model)
//! - Altitude physiology zones and grade-difficulty breakdowns
//! - Per-day segment statistics between camp waypoints
//! - Chart coordinate mapping and section-comparison overlays
//! - Spatial snapping of map coordinates onto the route
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel processing with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use trail_profile::{TrailPoint, ProfileConfig, build_profile, compute_stats};
//!
//! // Raw track: (longitude, latitude, elevation in meters)
//! let track = vec![
//!     TrailPoint::new(-121.6505, 41.0120, 900.0),
//!     TrailPoint::new(-121.6512, 41.0165, 912.0),
//!     TrailPoint::new(-121.6520, 41.0210, 921.0),
//! ];
//!
//! let profile = build_profile(&track, &ProfileConfig::default());
//! let stats = compute_stats(&profile);
//! println!("{:.1} mi, +{:.0}'", stats.total_miles, stats.total_gain_ft);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ProfileError, Result};

// Geographic utilities (haversine distance, track length, unit conversions)
pub mod geo_utils;

// Moving-average elevation smoothing
pub mod smoothing;
pub use smoothing::smooth_elevations;
#[cfg(feature = "parallel")]
pub use smoothing::smooth_elevations_parallel;

// Profile derivation (distance, grade, threshold-filtered gain/loss)
pub mod profile;
pub use profile::{
    build_profile, build_profile_from_smoothed, downsample_profile, ProfileConfig, ProfilePoint,
};

// Mile-indexed lookups over a derived profile
pub mod query;
pub use query::{elevation_at_mile, mile_range_indices, nearest_point, point_at_mile};

// Aggregate trail statistics
pub mod stats;
pub use stats::{compute_stats, estimated_moving_time_hours, ProfileStats};

// Altitude physiology zones and grade-difficulty buckets
pub mod zones;
pub use zones::{
    calculate_altitude_distribution, calculate_grade_distribution, AltitudeDistribution,
    AltitudeZone, AltitudeZoneConfig, GradeBucket, GradeDistribution, RiskLevel,
};

// Day segments and camp marker placement
pub mod segments;
pub use segments::{build_day_segments, place_camp_markers, CampMarker, CampWaypoint, DaySegment};

// Chart coordinate mapping (linear scales, axis ticks, projections)
pub mod chart;
pub use chart::{ChartGeometry, ChartLayout, LinearScale};

// Section comparison overlays (downsampled profiles + raw stats)
pub mod overlay;
pub use overlay::{combined_chart_bounds, ChartBounds, SectionProfile, SectionStats};

// Spatial snapping of lon/lat coordinates onto the route
pub mod spatial;
pub use spatial::{SnapResult, TrailIndex};

// Stateful profile engine (recomputes on track load)
pub mod engine;
pub use engine::{with_engine, ProfileEngine, ENGINE};

// ============================================================================
// Core Types
// ============================================================================

/// A raw trail point: GPS coordinate plus elevation in meters.
///
/// Component order follows the GeoJSON convention used by the upstream data
/// loader: `(longitude, latitude, elevation_m)`.
///
/// # Example
/// ```
/// use trail_profile::TrailPoint;
/// let point = TrailPoint::new(-121.6505, 41.0120, 900.0); // Burney Falls
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation_m: f64,
}

impl TrailPoint {
    /// Create a new trail point.
    pub fn new(longitude: f64, latitude: f64, elevation_m: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation_m,
        }
    }

    /// Check if the point has valid, finite coordinates and elevation.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.elevation_m.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl From<[f64; 3]> for TrailPoint {
    fn from(triple: [f64; 3]) -> Self {
        Self::new(triple[0], triple[1], triple[2])
    }
}

/// Filter a raw coordinate array down to valid trail points.
///
/// The profile pipeline assumes a clean input sequence; this is the upstream
/// filter that enforces it. Points with non-finite or out-of-range components
/// are dropped, matching how the data loader discards malformed GeoJSON
/// coordinates before profile derivation.
pub fn sanitize_track(coordinates: &[[f64; 3]]) -> Vec<TrailPoint> {
    let points: Vec<TrailPoint> = coordinates
        .iter()
        .map(|&triple| TrailPoint::from(triple))
        .filter(|p| p.is_valid())
        .collect();

    let dropped = coordinates.len() - points.len();
    if dropped > 0 {
        log::debug!(
            "[Track] Dropped {} malformed point(s) of {}",
            dropped,
            coordinates.len()
        );
    }

    points
}

/// Bounding box for a trail, used for map viewport fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from trail points. Returns `None` for an empty track.
    pub fn from_points(points: &[TrailPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Center of the bounds as `(longitude, latitude)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Vec<TrailPoint> {
        vec![
            TrailPoint::new(-121.6505, 41.0120, 900.0),
            TrailPoint::new(-121.6512, 41.0165, 912.0),
            TrailPoint::new(-121.6520, 41.0210, 921.0),
            TrailPoint::new(-121.6531, 41.0255, 915.0),
            TrailPoint::new(-121.6540, 41.0300, 930.0),
        ]
    }

    #[test]
    fn test_trail_point_validation() {
        assert!(TrailPoint::new(-121.65, 41.01, 900.0).is_valid());
        assert!(!TrailPoint::new(0.0, 91.0, 900.0).is_valid());
        assert!(!TrailPoint::new(181.0, 0.0, 900.0).is_valid());
        assert!(!TrailPoint::new(-121.65, 41.01, f64::NAN).is_valid());
        assert!(!TrailPoint::new(f64::INFINITY, 41.01, 900.0).is_valid());
    }

    #[test]
    fn test_sanitize_track_drops_malformed() {
        let coords = [
            [-121.65, 41.01, 900.0],
            [f64::NAN, 41.02, 905.0],
            [-121.66, 41.03, f64::INFINITY],
            [-121.67, 41.04, 910.0],
        ];
        let track = sanitize_track(&coords);
        assert_eq!(track.len(), 2);
        assert_eq!(track[0].latitude, 41.01);
        assert_eq!(track[1].elevation_m, 910.0);
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points(&sample_track()).unwrap();
        assert_eq!(bounds.min_lat, 41.0120);
        assert_eq!(bounds.max_lat, 41.0300);
        assert_eq!(bounds.min_lng, -121.6540);
        assert_eq!(bounds.max_lng, -121.6505);

        let (lng, lat) = bounds.center();
        assert!((lat - 41.021).abs() < 1e-9);
        assert!((lng - -121.65225).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }
}
