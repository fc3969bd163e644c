//! Masked array representation for invalid/missing elements
//!
//! This module pairs an `ndarray` data array with a per-element validity
//! mask. A mask value of `true` marks an element as invalid: masked
//! elements are excluded from every statistic, and a reduction slice with
//! no valid elements produces a masked output element.
//!
//! Non-finite data values (NaN, infinities) are treated as invalid even
//! when unmasked, matching the skip-invalid behavior of the reduction
//! kernels.

use crate::errors::{AggregatorError, Result};
use ndarray::ArrayD;

/// An N-dimensional `f32` array paired with a per-element validity mask
///
/// `true` in the mask marks an element as invalid (excluded from
/// statistics). The mask always has the same shape as the data.
#[derive(Debug, Clone)]
pub struct MaskedArrayD {
    data: ArrayD<f32>,
    mask: ArrayD<bool>,
}

impl MaskedArrayD {
    /// Create a masked array from data and an explicit mask
    ///
    /// # Errors
    ///
    /// Returns `MaskMismatch` if the mask shape differs from the data shape.
    pub fn new(data: ArrayD<f32>, mask: ArrayD<bool>) -> Result<Self> {
        if data.shape() != mask.shape() {
            return Err(AggregatorError::MaskMismatch {
                data_shape: data.shape().to_vec(),
                mask_shape: mask.shape().to_vec(),
            });
        }
        Ok(Self { data, mask })
    }

    /// Create an unmasked array (every element valid)
    #[must_use]
    pub fn from_array(data: ArrayD<f32>) -> Self {
        let mask = ArrayD::from_elem(data.raw_dim(), false);
        Self { data, mask }
    }

    /// Create a masked array where elements satisfying `predicate` are masked
    #[must_use]
    pub fn masked_where<F>(data: ArrayD<f32>, predicate: F) -> Self
    where
        F: Fn(f32) -> bool,
    {
        let mask = data.mapv(|x| predicate(x));
        Self { data, mask }
    }

    /// Create a masked array with all elements greater than `threshold` masked
    #[must_use]
    pub fn masked_greater(data: ArrayD<f32>, threshold: f32) -> Self {
        Self::masked_where(data, |x| x > threshold)
    }

    /// The underlying data array
    #[must_use]
    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// The validity mask (`true` = invalid)
    #[must_use]
    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    /// Shape of the array
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether any element is masked
    #[must_use]
    pub fn any_masked(&self) -> bool {
        self.mask.iter().any(|&m| m)
    }

    /// Number of valid (unmasked and finite) elements
    #[must_use]
    pub fn count_valid(&self) -> usize {
        self.data
            .iter()
            .zip(self.mask.iter())
            .filter(|(v, &m)| !m && v.is_finite())
            .count()
    }

    /// The data with masked elements replaced by `fill`
    #[must_use]
    pub fn filled(&self, fill: f32) -> ArrayD<f32> {
        let mut out = self.data.clone();
        out.zip_mut_with(&self.mask, |v, &m| {
            if m {
                *v = fill;
            }
        });
        out
    }

    /// Consume the masked array, returning its data and mask
    #[must_use]
    pub fn into_parts(self) -> (ArrayD<f32>, ArrayD<bool>) {
        (self.data, self.mask)
    }
}

impl From<ArrayD<f32>> for MaskedArrayD {
    fn from(data: ArrayD<f32>) -> Self {
        Self::from_array(data)
    }
}
