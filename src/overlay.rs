//! Section comparison overlays.
//!
//! The dashboard lets the planner layer other candidate trail sections over
//! the main profile as dashed comparison lines. Overlays are heavily
//! downsampled `(miles, feet)` pairs with compact summary stats, small enough
//! to ship inside a JSON bundle.
//!
//! Overlay stats intentionally use the raw point-to-point gain/loss sum, not
//! the thresholded accumulation: they summarize an already-downsampled shape,
//! where aggressive sampling has done the de-noising.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::ProfilePoint;

/// Summary statistics for an overlay section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStats {
    /// End-to-end distance in miles
    pub distance_miles: f64,
    pub min_elevation_ft: f64,
    pub max_elevation_ft: f64,
    /// Raw (unthresholded) gain across the sampled points, rounded to feet
    pub gain_ft: f64,
    /// Raw (unthresholded) loss across the sampled points, rounded to feet
    pub loss_ft: f64,
}

/// A downsampled comparison profile for one candidate section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProfile {
    pub id: String,
    pub name: String,
    /// `(distance_miles, elevation_ft)` pairs; miles carry one decimal,
    /// elevations are whole feet
    pub points: Vec<(f64, f64)>,
    pub stats: SectionStats,
}

/// Combined axis bounds across the native profile and active overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub distance_max_miles: f64,
    pub min_elevation_ft: f64,
    pub max_elevation_ft: f64,
}

impl SectionProfile {
    /// Build an overlay by downsampling a full profile.
    ///
    /// Keeps the first point, every `sample_rate`-th point, and the last
    /// point; rounds miles to one decimal and elevations to whole feet.
    /// Returns a `ConfigError` for a sample rate of 0.
    pub fn from_profile(
        id: &str,
        name: &str,
        profile: &[ProfilePoint],
        sample_rate: usize,
    ) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ProfileError::config("overlay sample rate must be >= 1"));
        }

        let last = profile.len().saturating_sub(1);
        let points: Vec<(f64, f64)> = profile
            .iter()
            .enumerate()
            .filter(|(i, _)| *i == 0 || *i == last || i % sample_rate == 0)
            .map(|(_, p)| {
                (
                    (p.distance_miles * 10.0).round() / 10.0,
                    p.elevation_ft.round(),
                )
            })
            .collect();

        Ok(Self::from_pairs(id, name, points))
    }

    /// Build an overlay directly from `(miles, feet)` pairs, e.g. parsed from
    /// the bundled section-profile JSON.
    pub fn from_pairs(id: &str, name: &str, points: Vec<(f64, f64)>) -> Self {
        let stats = section_stats(&points);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            points,
            stats,
        }
    }

    /// Distance at the overlay's last point, 0 for an empty overlay.
    pub fn end_mile(&self) -> f64 {
        self.points.last().map(|p| p.0).unwrap_or(0.0)
    }
}

fn section_stats(points: &[(f64, f64)]) -> SectionStats {
    let mut stats = SectionStats {
        distance_miles: points.last().map(|p| p.0).unwrap_or(0.0),
        min_elevation_ft: 0.0,
        max_elevation_ft: 0.0,
        gain_ft: 0.0,
        loss_ft: 0.0,
    };
    if points.is_empty() {
        return stats;
    }

    let mut min_ele = f64::MAX;
    let mut max_ele = f64::MIN;
    let mut gain = 0.0;
    let mut loss = 0.0;

    for (i, &(_, ele)) in points.iter().enumerate() {
        min_ele = min_ele.min(ele);
        max_ele = max_ele.max(ele);
        if i > 0 {
            let diff = ele - points[i - 1].1;
            if diff > 0.0 {
                gain += diff;
            } else {
                loss += diff.abs();
            }
        }
    }

    stats.min_elevation_ft = min_ele;
    stats.max_elevation_ft = max_ele;
    stats.gain_ft = gain.round();
    stats.loss_ft = loss.round();
    stats
}

/// Merge the native profile's extent with the active overlays', producing the
/// shared chart domain. Returns `None` when there is nothing to chart.
pub fn combined_chart_bounds(
    profile: &[ProfilePoint],
    overlays: &[&SectionProfile],
) -> Option<ChartBounds> {
    let mut distance_max = profile.last().map(|p| p.distance_miles).unwrap_or(0.0);
    let mut min_ele = f64::MAX;
    let mut max_ele = f64::MIN;
    let mut has_data = false;

    for point in profile {
        min_ele = min_ele.min(point.elevation_ft);
        max_ele = max_ele.max(point.elevation_ft);
        has_data = true;
    }
    for overlay in overlays {
        distance_max = distance_max.max(overlay.end_mile());
        for &(_, ele) in &overlay.points {
            min_ele = min_ele.min(ele);
            max_ele = max_ele.max(ele);
            has_data = true;
        }
    }

    if !has_data || distance_max <= 0.0 {
        return None;
    }

    Some(ChartBounds {
        distance_max_miles: distance_max,
        min_elevation_ft: min_ele,
        max_elevation_ft: max_ele,
    })
}
