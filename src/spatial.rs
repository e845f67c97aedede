//! Spatial snapping of lon/lat coordinates onto the route.
//!
//! Two dashboard interactions need the reverse of the mile-indexed lookups:
//! given a map coordinate, find the nearest profile point. Camp waypoints get
//! snapped onto the route to receive their mile markers, and hovering the map
//! highlights the corresponding chart point.
//!
//! The index projects profile points into a local planar frame (meters per
//! degree of latitude, longitude scaled by the cosine of the mean latitude)
//! and bulk-loads them into an R-tree. At trail scale the projection error is
//! negligible next to GPS noise.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::{ProfilePoint, TrailPoint};

/// Meters per degree of latitude (WGS84 meridional approximation).
const METERS_PER_DEG_LAT: f64 = 111_132.92;

/// A profile point projected into the index's planar frame.
#[derive(Debug, Clone)]
struct IndexedTrailPoint {
    x: f64,
    y: f64,
    index: usize,
    source: TrailPoint,
    mile: f64,
    elevation_ft: f64,
}

impl RTreeObject for IndexedTrailPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedTrailPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Result of snapping a coordinate onto the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// Index of the nearest profile point
    pub index: usize,
    /// Mile marker of the nearest profile point
    pub mile: f64,
    /// Smoothed elevation at the nearest profile point, in feet
    pub elevation_ft: f64,
    /// Great-circle distance from the query coordinate to the snapped point,
    /// in meters
    pub offset_meters: f64,
}

/// R-tree index over a derived profile for nearest-point queries.
pub struct TrailIndex {
    tree: RTree<IndexedTrailPoint>,
    meters_per_deg_lon: f64,
}

impl TrailIndex {
    /// Build an index over a profile. Returns `None` for an empty profile.
    pub fn build(profile: &[ProfilePoint]) -> Option<Self> {
        if profile.is_empty() {
            return None;
        }

        let mean_lat =
            profile.iter().map(|p| p.source.latitude).sum::<f64>() / profile.len() as f64;
        let meters_per_deg_lon = METERS_PER_DEG_LAT * mean_lat.to_radians().cos();

        let entries: Vec<IndexedTrailPoint> = profile
            .iter()
            .enumerate()
            .map(|(index, p)| IndexedTrailPoint {
                x: p.source.longitude * meters_per_deg_lon,
                y: p.source.latitude * METERS_PER_DEG_LAT,
                index,
                source: p.source,
                mile: p.distance_miles,
                elevation_ft: p.elevation_ft,
            })
            .collect();

        Some(Self {
            tree: RTree::bulk_load(entries),
            meters_per_deg_lon,
        })
    }

    /// Snap a lon/lat coordinate to the nearest profile point.
    pub fn nearest(&self, longitude: f64, latitude: f64) -> Option<SnapResult> {
        let query = [
            longitude * self.meters_per_deg_lon,
            latitude * METERS_PER_DEG_LAT,
        ];
        let hit = self.tree.nearest_neighbor(&query)?;

        let probe = TrailPoint::new(longitude, latitude, hit.source.elevation_m);
        Some(SnapResult {
            index: hit.index,
            mile: hit.mile,
            elevation_ft: hit.elevation_ft,
            offset_meters: haversine_distance(&probe, &hit.source),
        })
    }

    /// Snap a coordinate and return just the mile marker, the form camp
    /// ingestion uses to assign `route_mile`.
    pub fn snap_to_mile(&self, longitude: f64, latitude: f64) -> Option<f64> {
        self.nearest(longitude, latitude).map(|snap| snap.mile)
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_profile, ProfileConfig, TrailPoint};

    fn sample_profile() -> Vec<ProfilePoint> {
        let track: Vec<TrailPoint> = (0..50)
            .map(|i| {
                TrailPoint::new(
                    -121.65 - i as f64 * 0.002,
                    41.0 + i as f64 * 0.01,
                    900.0 + i as f64 * 5.0,
                )
            })
            .collect();
        build_profile(&track, &ProfileConfig::default())
    }

    #[test]
    fn test_build_empty() {
        assert!(TrailIndex::build(&[]).is_none());
    }

    #[test]
    fn test_exact_point_snaps_to_itself() {
        let profile = sample_profile();
        let index = TrailIndex::build(&profile).unwrap();
        assert_eq!(index.len(), profile.len());

        let target = &profile[20];
        let snap = index
            .nearest(target.source.longitude, target.source.latitude)
            .unwrap();

        assert_eq!(snap.index, 20);
        assert_eq!(snap.mile, target.distance_miles);
        assert_eq!(snap.elevation_ft, target.elevation_ft);
        assert!(snap.offset_meters < 0.01);
    }

    #[test]
    fn test_offset_coordinate_snaps_to_nearest() {
        let profile = sample_profile();
        let index = TrailIndex::build(&profile).unwrap();

        // ~100 m east of point 10
        let target = &profile[10].source;
        let snap = index
            .nearest(target.longitude + 0.0012, target.latitude)
            .unwrap();

        assert_eq!(snap.index, 10);
        assert!(snap.offset_meters > 50.0 && snap.offset_meters < 150.0);
    }

    #[test]
    fn test_snap_to_mile() {
        let profile = sample_profile();
        let index = TrailIndex::build(&profile).unwrap();
        let target = &profile[33];

        let mile = index
            .snap_to_mile(target.source.longitude, target.source.latitude)
            .unwrap();
        assert_eq!(mile, target.distance_miles);
    }
}
