//! Mile-indexed lookups over a derived profile.
//!
//! These power marker placement ("what elevation is camp at mile 23.4?") and
//! interactive hover ("which profile point is closest to the cursor?"). They
//! rely on the profile's sorted-distance invariant and clamp rather than fail
//! at the trail boundaries.

use crate::ProfilePoint;

/// The profile point at a given mile marker.
///
/// Miles at or below 0 resolve to the first point; miles past the end of the
/// trail clamp to the last point. Otherwise the first point whose distance
/// reaches `mile` wins. Returns `None` only for an empty profile.
pub fn point_at_mile(profile: &[ProfilePoint], mile: f64) -> Option<&ProfilePoint> {
    let first = profile.first()?;
    if mile <= 0.0 {
        return Some(first);
    }
    profile
        .iter()
        .find(|p| p.distance_miles >= mile)
        .or_else(|| profile.last())
}

/// Smoothed elevation (feet) at a given mile marker.
///
/// Clamping behavior matches [`point_at_mile`]; `None` only for an empty
/// profile.
pub fn elevation_at_mile(profile: &[ProfilePoint], mile: f64) -> Option<f64> {
    point_at_mile(profile, mile).map(|p| p.elevation_ft)
}

/// The profile point nearest to a target mile.
///
/// Linear scan for the minimal `|distance_miles - target_mile|`; ties go to
/// the first point found (lowest index), so repeated identical queries are
/// deterministic. Returns `None` for an empty profile.
pub fn nearest_point(profile: &[ProfilePoint], target_mile: f64) -> Option<&ProfilePoint> {
    let mut best = profile.first()?;
    let mut best_diff = (best.distance_miles - target_mile).abs();

    for point in &profile[1..] {
        let diff = (point.distance_miles - target_mile).abs();
        if diff < best_diff {
            best_diff = diff;
            best = point;
        }
    }

    Some(best)
}

/// Index range `(start, end)` of profile points whose distance lies within
/// `[start_mile, end_mile]`, inclusive on both ends.
///
/// Returns `None` when no point falls inside the span.
pub fn mile_range_indices(
    profile: &[ProfilePoint],
    start_mile: f64,
    end_mile: f64,
) -> Option<(usize, usize)> {
    let start = profile
        .iter()
        .position(|p| p.distance_miles >= start_mile)?;
    let end = profile
        .iter()
        .rposition(|p| p.distance_miles <= end_mile)?;
    if end < start {
        return None;
    }
    Some((start, end))
}
