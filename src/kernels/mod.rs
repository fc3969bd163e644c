//! Statistic kernels for eager and lazy axis reduction
//!
//! This module provides the reduction functions that back each named
//! aggregator. Every statistic has an eager kernel operating on an
//! in-memory [`MaskedArrayD`]; statistics with a deferred-computation
//! equivalent also get a lazy kernel that records a reduction node on a
//! [`LazyArray`] without computing anything.
//!
//! # Organization
//!
//! - [`reduce`]: simple reducers (max, min, sum, count)
//! - [`moments`]: mean, variance and standard deviation
//! - [`quantile`]: median and percentile
//!
//! Masked-element semantics live here: masked or non-finite elements never
//! contribute to a statistic, and a reduction slice with no valid elements
//! produces a masked output element.

pub mod moments;
pub mod quantile;
pub mod reduce;

// Re-export the kernels for convenience
pub use moments::{mean_axis, std_dev_axis, variance_axis};
pub use quantile::{median_axis, percentile_axis};
pub use reduce::{count_axis, max_axis, min_axis, sum_axis};

use crate::errors::{AggregatorError, Result};
use crate::lazy::LazyArray;
use crate::masked::MaskedArrayD;
use crate::params::AggParams;
use ndarray::ArrayD;
use rayon::prelude::*;

/// Signature of an eager reduction kernel
pub type EagerKernel = fn(&MaskedArrayD, &[usize], &AggParams) -> Result<MaskedArrayD>;

/// Signature of a lazy reduction kernel
pub type LazyKernel = fn(&LazyArray, &[usize], &AggParams) -> Result<LazyArray>;

/// Checks that `axes` names a valid, duplicate-free set of dimensions
///
/// # Errors
///
/// Returns `UnsupportedAxis` for an out-of-range axis and
/// `InvalidParameter` for an empty or duplicated axis list.
pub fn validate_axes(ndim: usize, axes: &[usize]) -> Result<()> {
    if axes.is_empty() {
        return Err(AggregatorError::InvalidParameter {
            name: "axes".to_string(),
            message: "at least one axis must be given".to_string(),
        });
    }
    for (i, &axis) in axes.iter().enumerate() {
        if axis >= ndim {
            return Err(AggregatorError::UnsupportedAxis { axis, ndim });
        }
        if axes[..i].contains(&axis) {
            return Err(AggregatorError::InvalidParameter {
                name: "axes".to_string(),
                message: format!("axis {axis} given more than once"),
            });
        }
    }
    Ok(())
}

/// Shape remaining after removing `axes` from `shape`
#[must_use]
pub fn collapsed_shape(shape: &[usize], axes: &[usize]) -> Vec<usize> {
    shape
        .iter()
        .enumerate()
        .filter(|(d, _)| !axes.contains(d))
        .map(|(_, &len)| len)
        .collect()
}

/// Moves the collapsed axes to the end and merges them into one
///
/// Multi-axis collapse reduces over the merged axis in a single pass, so
/// statistics that do not compose across partial reductions (mean,
/// variance, percentile) stay exact under masking.
fn merge_axes(a: &MaskedArrayD, axes: &[usize]) -> Result<MaskedArrayD> {
    let shape = a.shape().to_vec();
    let ndim = shape.len();

    let mut order: Vec<usize> = (0..ndim).filter(|d| !axes.contains(d)).collect();
    let mut collapsed: Vec<usize> = axes.to_vec();
    collapsed.sort_unstable();
    order.extend(&collapsed);

    let merged_len: usize = collapsed.iter().map(|&axis| shape[axis]).product();
    let mut merged_shape: Vec<usize> = order[..ndim - axes.len()]
        .iter()
        .map(|&d| shape[d])
        .collect();
    merged_shape.push(merged_len);

    let data = a
        .data()
        .view()
        .permuted_axes(order.clone())
        .as_standard_layout()
        .to_owned()
        .into_shape(merged_shape.clone())?;
    let mask = a
        .mask()
        .view()
        .permuted_axes(order)
        .as_standard_layout()
        .to_owned()
        .into_shape(merged_shape)?;

    MaskedArrayD::new(data, mask)
}

/// Output-lane coordinates for a flat output index
fn lane_coords(flat: usize, kept: &[usize], out_shape: &[usize], ndim: usize) -> Vec<usize> {
    let mut coords = vec![0usize; ndim];
    let mut remaining = flat;
    for k in (0..kept.len()).rev() {
        coords[kept[k]] = remaining % out_shape[k];
        remaining /= out_shape[k];
    }
    coords
}

/// Valid values of one reduction lane, widened to f64 for accumulation
fn collect_valid(
    data: &ArrayD<f32>,
    mask: &ArrayD<bool>,
    coords: &mut [usize],
    axis: usize,
    axis_len: usize,
) -> Vec<f64> {
    let mut values = Vec::with_capacity(axis_len);
    for i in 0..axis_len {
        coords[axis] = i;
        if let (Some(&value), Some(&masked)) = (data.get(&*coords), mask.get(&*coords)) {
            if !masked && value.is_finite() {
                values.push(f64::from(value));
            }
        }
    }
    values
}

/// Applies `f` to the valid values of every lane along the collapsed axes
///
/// `f` receives the lane's valid values and returns the statistic, or
/// `None` when the lane admits no result (producing a masked element).
/// Lanes are processed in parallel across the output elements.
///
/// # Errors
///
/// Returns an error if the axis selection is invalid or reshaping fails.
pub(crate) fn map_valid_lanes<F>(a: &MaskedArrayD, axes: &[usize], f: F) -> Result<MaskedArrayD>
where
    F: Fn(Vec<f64>) -> Option<f64> + Sync,
{
    validate_axes(a.ndim(), axes)?;

    let merged;
    let (source, axis) = if axes.len() == 1 {
        (a, axes[0])
    } else {
        merged = merge_axes(a, axes)?;
        let last = merged.ndim() - 1;
        (&merged, last)
    };

    let shape = source.shape().to_vec();
    let ndim = shape.len();
    let axis_len = shape[axis];
    let kept: Vec<usize> = (0..ndim).filter(|&d| d != axis).collect();
    let out_shape: Vec<usize> = kept.iter().map(|&d| shape[d]).collect();
    let out_size: usize = out_shape.iter().product();

    let data = source.data();
    let mask = source.mask();

    let lanes: Vec<Option<f64>> = (0..out_size)
        .into_par_iter()
        .map(|flat| {
            let mut coords = lane_coords(flat, &kept, &out_shape, ndim);
            let values = collect_valid(data, mask, &mut coords, axis, axis_len);
            f(values)
        })
        .collect();

    let mut out_data = Vec::with_capacity(out_size);
    let mut out_mask = Vec::with_capacity(out_size);
    for lane in lanes {
        match lane {
            #[allow(clippy::cast_possible_truncation)]
            Some(value) => {
                out_data.push(value as f32);
                out_mask.push(false);
            }
            None => {
                out_data.push(f32::NAN);
                out_mask.push(true);
            }
        }
    }

    MaskedArrayD::new(
        ArrayD::from_shape_vec(out_shape.clone(), out_data)?,
        ArrayD::from_shape_vec(out_shape, out_mask)?,
    )
}

/// Lane mapping for statistics that expand into `extra` trailing values
///
/// `f` must return exactly `extra` results per lane. The output gains one
/// trailing dimension of length `extra` when `extra > 1`; a single result
/// per lane keeps the plain collapsed shape.
///
/// # Errors
///
/// Returns an error if the axis selection is invalid or reshaping fails.
pub(crate) fn expand_valid_lanes<F>(
    a: &MaskedArrayD,
    axes: &[usize],
    extra: usize,
    f: F,
) -> Result<MaskedArrayD>
where
    F: Fn(Vec<f64>) -> Vec<Option<f64>> + Sync,
{
    validate_axes(a.ndim(), axes)?;

    let merged;
    let (source, axis) = if axes.len() == 1 {
        (a, axes[0])
    } else {
        merged = merge_axes(a, axes)?;
        let last = merged.ndim() - 1;
        (&merged, last)
    };

    let shape = source.shape().to_vec();
    let ndim = shape.len();
    let axis_len = shape[axis];
    let kept: Vec<usize> = (0..ndim).filter(|&d| d != axis).collect();
    let lane_shape: Vec<usize> = kept.iter().map(|&d| shape[d]).collect();
    let lane_count: usize = lane_shape.iter().product();

    let data = source.data();
    let mask = source.mask();

    let lanes: Vec<Vec<Option<f64>>> = (0..lane_count)
        .into_par_iter()
        .map(|flat| {
            let mut coords = lane_coords(flat, &kept, &lane_shape, ndim);
            let values = collect_valid(data, mask, &mut coords, axis, axis_len);
            f(values)
        })
        .collect();

    let mut out_shape = lane_shape;
    if extra > 1 {
        out_shape.push(extra);
    }
    let out_size = lane_count * extra;

    let mut out_data = Vec::with_capacity(out_size);
    let mut out_mask = Vec::with_capacity(out_size);
    for lane in lanes {
        debug_assert_eq!(lane.len(), extra);
        for entry in lane {
            match entry {
                #[allow(clippy::cast_possible_truncation)]
                Some(value) => {
                    out_data.push(value as f32);
                    out_mask.push(false);
                }
                None => {
                    out_data.push(f32::NAN);
                    out_mask.push(true);
                }
            }
        }
    }

    MaskedArrayD::new(
        ArrayD::from_shape_vec(out_shape.clone(), out_data)?,
        ArrayD::from_shape_vec(out_shape, out_mask)?,
    )
}

/// Lazy kernel for the maximum statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn max_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(reduce::max_axis, axes, params, &[])
}

/// Lazy kernel for the minimum statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn min_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(reduce::min_axis, axes, params, &[])
}

/// Lazy kernel for the mean statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn mean_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(moments::mean_axis, axes, params, &[])
}

/// Lazy kernel for the sum statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn sum_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(reduce::sum_axis, axes, params, &[])
}

/// Lazy kernel for the standard deviation statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn std_dev_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(moments::std_dev_axis, axes, params, &[])
}

/// Lazy kernel for the variance statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn variance_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(moments::variance_axis, axes, params, &[])
}

/// Lazy kernel for the valid-element count statistic
///
/// # Errors
///
/// Returns an error if the axis selection is invalid for the deferred shape.
pub fn count_lazy(a: &LazyArray, axes: &[usize], params: &AggParams) -> Result<LazyArray> {
    a.deferred_reduce(reduce::count_axis, axes, params, &[])
}
