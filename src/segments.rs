//! Day segments and camp marker placement.
//!
//! The itinerary layer: camp waypoints carry a pre-computed route mile, and
//! consecutive camps bound one hiking day. Segment statistics come straight
//! from the profile's cumulative counters, so they agree with the stat cards
//! by construction.

use serde::{Deserialize, Serialize};

use crate::query::{mile_range_indices, point_at_mile};
use crate::ProfilePoint;

/// A camp or trailhead waypoint supplied by the itinerary data source.
///
/// Only `route_mile` matters to this layer; waypoints without one (e.g.
/// off-trail resupply stops) are skipped, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampWaypoint {
    pub name: String,
    pub route_mile: Option<f64>,
    pub day: Option<u32>,
}

impl CampWaypoint {
    pub fn new(name: &str, route_mile: f64) -> Self {
        Self {
            name: name.to_string(),
            route_mile: Some(route_mile),
            day: None,
        }
    }

    pub fn with_day(name: &str, route_mile: f64, day: u32) -> Self {
        Self {
            name: name.to_string(),
            route_mile: Some(route_mile),
            day: Some(day),
        }
    }
}

/// One hiking day: the stretch between two consecutive camps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySegment {
    pub day: u32,
    /// Name of the camp this day ends at
    pub name: String,
    pub start_mile: f64,
    pub end_mile: f64,
    pub distance_miles: f64,
    /// Threshold-filtered gain within the segment, in feet
    pub gain_ft: f64,
    /// Threshold-filtered loss within the segment, in feet
    pub loss_ft: f64,
    /// Highest smoothed elevation within the segment, in feet
    pub high_point_ft: f64,
}

/// A camp marker placed on the elevation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampMarker {
    pub name: String,
    /// Route mile clamped into the trail's extent
    pub mile: f64,
    pub elevation_ft: f64,
    pub day: Option<u32>,
}

/// Build per-day segments from a profile and the itinerary's camps.
///
/// Camps are sorted by route mile; each consecutive pair bounds a day. The
/// day number comes from the ending camp when present, otherwise from the
/// pair's ordinal. Segments covering fewer than two profile points are
/// dropped (they would render as nothing).
pub fn build_day_segments(profile: &[ProfilePoint], camps: &[CampWaypoint]) -> Vec<DaySegment> {
    if profile.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&CampWaypoint> = camps.iter().filter(|c| c.route_mile.is_some()).collect();
    sorted.sort_by(|a, b| {
        a.route_mile
            .partial_cmp(&b.route_mile)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut segments = Vec::new();
    for (i, pair) in sorted.windows(2).enumerate() {
        let start_mile = pair[0].route_mile.unwrap_or(0.0);
        let end_mile = pair[1].route_mile.unwrap_or(start_mile);
        let day = pair[1].day.unwrap_or(i as u32 + 1);

        let (start_idx, end_idx) = match mile_range_indices(profile, start_mile, end_mile) {
            Some(range) => range,
            None => continue,
        };
        if end_idx - start_idx < 1 {
            continue;
        }

        let start_point = &profile[start_idx];
        let end_point = &profile[end_idx];
        let high_point_ft = profile[start_idx..=end_idx]
            .iter()
            .map(|p| p.elevation_ft)
            .fold(f64::MIN, f64::max);

        segments.push(DaySegment {
            day,
            name: pair[1].name.clone(),
            start_mile,
            end_mile,
            distance_miles: end_point.distance_miles - start_point.distance_miles,
            gain_ft: end_point.cumulative_gain_ft - start_point.cumulative_gain_ft,
            loss_ft: end_point.cumulative_loss_ft - start_point.cumulative_loss_ft,
            high_point_ft,
        });
    }

    segments
}

/// Place camp markers on the profile.
///
/// Route miles are clamped into `[0, total_miles]` and resolved to an
/// elevation through the mile-indexed lookup. Camps without a route mile are
/// skipped; an empty profile yields no markers.
pub fn place_camp_markers(profile: &[ProfilePoint], camps: &[CampWaypoint]) -> Vec<CampMarker> {
    let total_miles = match profile.last() {
        Some(point) => point.distance_miles,
        None => return Vec::new(),
    };

    camps
        .iter()
        .filter_map(|camp| {
            let mile = camp.route_mile?.clamp(0.0, total_miles);
            let elevation_ft = point_at_mile(profile, mile)?.elevation_ft;
            Some(CampMarker {
                name: camp.name.clone(),
                mile,
                elevation_ft,
                day: camp.day,
            })
        })
        .collect()
}
