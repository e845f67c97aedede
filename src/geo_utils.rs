//! Geographic utilities for trail track analysis.
//!
//! Haversine distance, cumulative track length, and the unit conversions the
//! dashboard uses throughout (meters ↔ miles, meters ↔ feet).
//!
//! ## Algorithm Notes
//!
//! The haversine formula computes the great-circle distance between two
//! points on a sphere. It is the standard method for GPS distance
//! calculation, accurate to well within GPS receiver noise for trail-scale
//! distances. All coordinates are WGS84 latitude/longitude in degrees.

use geo::{Distance, Haversine, Point};

use crate::TrailPoint;

/// Meters per statute mile, as used by the dashboard's mileage displays.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Convert meters to miles.
#[inline]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Convert meters to feet.
#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Great-circle distance between two trail points in meters.
///
/// Elevation is ignored; this is the horizontal distance along the Earth's
/// surface, which is what cumulative trail mileage is built from.
///
/// # Example
///
/// ```rust
/// use trail_profile::TrailPoint;
/// use trail_profile::geo_utils::haversine_distance;
///
/// let burney = TrailPoint::new(-121.6505, 41.0120, 900.0);
/// let castella = TrailPoint::new(-122.3222, 41.1397, 600.0);
///
/// let distance = haversine_distance(&burney, &castella);
/// assert!((distance - 58_000.0).abs() < 2_000.0); // ~58 km as the crow flies
/// ```
#[inline]
pub fn haversine_distance(p1: &TrailPoint, p2: &TrailPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Total horizontal length of a track in meters.
///
/// Sums the haversine distance between consecutive points. Empty and
/// single-point tracks return 0.0.
pub fn polyline_length(points: &[TrailPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}
