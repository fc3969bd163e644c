//! Moment-based kernels: mean, variance and standard deviation
//!
//! Values are accumulated in f64 to avoid precision loss, then truncated
//! back to f32 on output. Variance and standard deviation honor the `ddof`
//! parameter (delta degrees of freedom); a lane whose valid-element count
//! does not exceed `ddof` yields a masked output element.

use super::map_valid_lanes;
use crate::errors::Result;
use crate::masked::MaskedArrayD;
use crate::params::AggParams;

#[allow(clippy::cast_precision_loss)]
fn lane_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[allow(clippy::cast_precision_loss)]
fn lane_variance(values: &[f64], ddof: u32) -> Option<f64> {
    let n = values.len();
    if n <= ddof as usize {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq_dev: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some(sum_sq_dev / (n - ddof as usize) as f64)
}

/// Computes the arithmetic mean along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn mean_axis(a: &MaskedArrayD, axes: &[usize], _params: &AggParams) -> Result<MaskedArrayD> {
    map_valid_lanes(a, axes, |values| lane_mean(&values))
}

/// Computes the variance along the collapsed axes
///
/// `ddof` defaults to zero when unset; registry aggregators override it.
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn variance_axis(a: &MaskedArrayD, axes: &[usize], params: &AggParams) -> Result<MaskedArrayD> {
    let ddof = params.ddof.unwrap_or(0);
    map_valid_lanes(a, axes, move |values| lane_variance(&values, ddof))
}

/// Computes the standard deviation along the collapsed axes
///
/// # Errors
///
/// Returns an error if the axis selection is invalid.
pub fn std_dev_axis(a: &MaskedArrayD, axes: &[usize], params: &AggParams) -> Result<MaskedArrayD> {
    let ddof = params.ddof.unwrap_or(0);
    map_valid_lanes(a, axes, move |values| {
        lane_variance(&values, ddof).map(f64::sqrt)
    })
}
