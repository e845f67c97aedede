//! Moving-average elevation smoothing.
//!
//! Consumer GPS elevation data is noisy enough that raw sample-to-sample
//! deltas overstate climb by orders of magnitude over a multi-day track. The
//! first stage of profile derivation is a centered, unweighted moving average
//! over the raw elevations, clipped at the track boundaries.

use crate::TrailPoint;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default smoothing window width in samples.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

#[cfg(feature = "parallel")]
const PARALLEL_CUTOFF: usize = 10_000;

/// Smooth raw track elevations with a centered moving average.
///
/// For index `i` the window spans
/// `[max(0, i - floor(w/2)), min(len, i + ceil(w/2)))` and the output is the
/// arithmetic mean of the elevations in that half-open range, so the window
/// never extends past the track boundaries. The output has the same length
/// and order as the input, in meters; a single-point track returns that
/// point's elevation unchanged.
///
/// A `window_size` of 0 is treated as 1 (no smoothing). Odd and even widths
/// are both valid; even widths bias the window one sample forward.
pub fn smooth_elevations(track: &[TrailPoint], window_size: usize) -> Vec<f64> {
    let window = window_size.max(1);
    (0..track.len())
        .map(|i| window_mean(track, i, window))
        .collect()
}

/// Parallel variant of [`smooth_elevations`] for full-resolution GPX tracks.
///
/// Falls back to the sequential implementation below a size cutoff where
/// thread fan-out costs more than it saves.
#[cfg(feature = "parallel")]
pub fn smooth_elevations_parallel(track: &[TrailPoint], window_size: usize) -> Vec<f64> {
    if track.len() < PARALLEL_CUTOFF {
        return smooth_elevations(track, window_size);
    }

    let window = window_size.max(1);
    (0..track.len())
        .into_par_iter()
        .map(|i| window_mean(track, i, window))
        .collect()
}

#[inline]
fn window_mean(track: &[TrailPoint], i: usize, window: usize) -> f64 {
    let start = i.saturating_sub(window / 2);
    let end = (i + (window + 1) / 2).min(track.len());
    let sum: f64 = track[start..end].iter().map(|p| p.elevation_m).sum();
    sum / (end - start) as f64
}
