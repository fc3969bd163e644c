//! Simple reduction kernels: maximum, minimum, sum and count
//!
//! Each kernel collapses the given axes of a masked array, skipping masked
//! and non-finite elements. A lane with no valid elements yields a masked
//! output element, except for `count_axis` which yields zero.

use super::map_valid_lanes;
use crate::errors::Result;
use crate::masked::MaskedArrayD;
use crate::params::AggParams;

/// Computes the maximum along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn max_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| {
        values.into_iter().reduce(f64::max)
    })
}

/// Computes the minimum along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn min_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| {
        values.into_iter().reduce(f64::min)
    })
}

/// Computes the sum along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn sum_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum())
        }
    })
}

/// Counts the valid (unmasked, finite) elements along the collapsed axes
///
/// The count is defined for every lane, so the result carries no masked
/// elements; a fully masked lane counts zero.
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
#[allow(clippy::cast_precision_loss)]
pub fn count_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| Some(values.len() as f64))
}
