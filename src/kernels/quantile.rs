//! Rank-based kernels: median and percentile
//!
//! Percentiles use linear interpolation between closest ranks on the
//! sorted valid values of each lane. The percentile kernel expands the
//! result with one trailing dimension per requested rank when more than
//! one percentile is asked for.

use super::{expand_valid_lanes, map_valid_lanes};
use crate::errors::{AggregatorError, Result};
use crate::masked::MaskedArrayD;
use crate::params::AggParams;

/// Linear-interpolation quantile of already sorted values
///
/// `rank` is a percentile in 0..=100. Empty input has no quantile.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn interpolated_rank(sorted: &[f64], rank: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }
    let position = rank / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

fn sort_lane(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_unstable_by(f64::total_cmp);
    values
}

/// Computes the median along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn median_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| {
        interpolated_rank(&sort_lane(values), 50.0)
    })
}

/// Computes percentiles along the collapsed axes
///
/// Requires the `percentiles` parameter, each rank in 0..=100. With `n`
/// requested percentiles the result gains a trailing dimension of length
/// `n` when `n > 1`; a single percentile keeps the plain collapsed shape.
///
/// # Errors
///
/// Returns `InvalidParameter` if `percentiles` is missing, empty or holds
/// an out-of-range rank, and an axis error if the axis selection is
/// invalid.
pub fn percentile_axis(
    a: &MaskedArrayD,
    axes: &[usize],
    params: &AggParams,
) -> Result<MaskedArrayD> {
    let percentiles = params
        .percentiles
        .as_ref()
        .ok_or_else(|| AggregatorError::InvalidParameter {
            name: "percentiles".to_string(),
            message: "percentile aggregation requires the 'percentiles' parameter".to_string(),
        })?;
    if percentiles.is_empty() {
        return Err(AggregatorError::InvalidParameter {
            name: "percentiles".to_string(),
            message: "at least one percentile rank must be given".to_string(),
        });
    }
    for &rank in percentiles {
        if !(0.0..=100.0).contains(&rank) {
            return Err(AggregatorError::InvalidParameter {
                name: "percentiles".to_string(),
                message: format!("percentile rank {rank} is outside 0..=100"),
            });
        }
    }

    expand_valid_lanes(a, axes, percentiles.len(), |values| {
        let sorted = sort_lane(values);
        percentiles
            .iter()
            .map(|&rank| interpolated_rank(&sorted, rank))
            .collect()
    })
}
