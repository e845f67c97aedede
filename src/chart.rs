//! Chart coordinate mapping for the elevation profile view.
//!
//! The rendering layer draws into a fixed 1000×280 viewBox; this module owns
//! the linear domain↔range scales, the axis tick policy (elevation ticks on
//! 500 ft steps, mile ticks every 5 miles), and the projection of profile
//! points and mile markers into chart coordinates. Rendering itself (SVG
//! paths, gradients, tooltips) stays in the view layer.

use serde::{Deserialize, Serialize};

use crate::query::point_at_mile;
use crate::ProfilePoint;

/// Minimum elevation-domain span in feet, so short flat trails still get a
/// readable vertical axis.
const MIN_ELEVATION_SPAN_FT: f64 = 200.0;

/// Fraction of the domain span added as padding above and below.
const ELEVATION_PADDING_RATIO: f64 = 0.1;

/// A linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range. Values outside the domain
    /// extrapolate, matching how the rendering layer treats them.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Fixed chart dimensions and margins, in viewBox units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 280.0,
            margin_top: 30.0,
            margin_right: 50.0,
            margin_bottom: 45.0,
            margin_left: 70.0,
        }
    }
}

/// Chart scales derived from a profile (and optionally overlay bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub layout: ChartLayout,
    pub x: LinearScale,
    pub y: LinearScale,
}

impl ChartGeometry {
    /// Build scales for explicit data bounds.
    ///
    /// Returns `None` when there is nothing to chart (non-positive distance).
    /// The elevation domain spans at least 200 ft and is padded by 10% on
    /// each side; the y range is inverted because chart y grows downward.
    pub fn from_bounds(
        distance_max_miles: f64,
        min_elevation_ft: f64,
        max_elevation_ft: f64,
        layout: ChartLayout,
    ) -> Option<Self> {
        if distance_max_miles <= 0.0 {
            return None;
        }

        let span = (max_elevation_ft - min_elevation_ft).max(MIN_ELEVATION_SPAN_FT);
        let padding = span * ELEVATION_PADDING_RATIO;

        let x = LinearScale::new(
            (0.0, distance_max_miles),
            (layout.margin_left, layout.width - layout.margin_right),
        );
        let y = LinearScale::new(
            (min_elevation_ft - padding, max_elevation_ft + padding),
            (layout.height - layout.margin_bottom, layout.margin_top),
        );

        Some(Self { layout, x, y })
    }

    /// Build scales for a profile. Returns `None` for an empty or
    /// zero-length profile.
    pub fn from_profile(profile: &[ProfilePoint], layout: ChartLayout) -> Option<Self> {
        let last = profile.last()?;
        let min_ele = profile
            .iter()
            .map(|p| p.elevation_ft)
            .fold(f64::MAX, f64::min);
        let max_ele = profile
            .iter()
            .map(|p| p.elevation_ft)
            .fold(f64::MIN, f64::max);
        Self::from_bounds(last.distance_miles, min_ele, max_ele, layout)
    }

    /// Project a profile point into chart coordinates.
    pub fn project(&self, point: &ProfilePoint) -> (f64, f64) {
        (
            self.x.scale(point.distance_miles),
            self.y.scale(point.elevation_ft),
        )
    }

    /// Project a mile marker onto the profile line.
    ///
    /// Resolves the marker's elevation through the mile-indexed lookup, so
    /// the marker lands on the drawn line rather than interpolating.
    pub fn project_mile(&self, profile: &[ProfilePoint], mile: f64) -> Option<(f64, f64)> {
        let point = point_at_mile(profile, mile)?;
        Some((self.x.scale(mile), self.y.scale(point.elevation_ft)))
    }

    /// Elevation axis tick values: the domain divided into ~5 steps, rounded
    /// up to the nearest 500 ft.
    pub fn elevation_ticks(&self) -> Vec<f64> {
        let (d0, d1) = self.y.domain;
        let span = d1 - d0;
        if span <= 0.0 {
            return Vec::new();
        }

        let step = (span / 5.0 / 500.0).ceil() * 500.0;
        let mut ticks = Vec::new();
        let mut value = (d0 / step).ceil() * step;
        while value <= d1 {
            ticks.push(value);
            value += step;
        }
        ticks
    }

    /// Mile axis tick values: every 5 miles up to the domain end rounded up
    /// to the next multiple of 5.
    pub fn mile_ticks(&self) -> Vec<f64> {
        let max = (self.x.domain.1 / 5.0).ceil() * 5.0;
        let mut ticks = Vec::new();
        let mut mile = 0.0;
        while mile <= max {
            ticks.push(mile);
            mile += 5.0;
        }
        ticks
    }
}
