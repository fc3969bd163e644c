//! Deferred array handles for lazy aggregation
//!
//! A [`LazyArray`] is an opaque handle to a not-yet-computed array: it
//! carries the logical shape and dtype up front, while the values live in
//! a node graph that is only evaluated when [`LazyArray::compute`] is
//! called. Registering a reduction never touches the data, so building a
//! deferred pipeline is cheap regardless of array size.
//!
//! Reduction nodes store the same eager kernel the immediate path uses,
//! so a materialized lazy result is identical to the eager result by
//! construction, masked-element semantics included.

use crate::errors::Result;
use crate::kernels::{self, EagerKernel};
use crate::masked::MaskedArrayD;
use crate::params::AggParams;
use ndarray::ArrayD;
use std::sync::Arc;

/// A node in the deferred computation graph
#[derive(Debug)]
enum LazyNode {
    /// In-memory source data wrapped for deferred processing
    Source(MaskedArrayD),
    /// A pending axis reduction over another deferred array
    Reduce {
        input: LazyArray,
        kernel: EagerKernel,
        axes: Vec<usize>,
        params: AggParams,
    },
}

/// An opaque handle to a deferred array: logical shape, dtype and a
/// shared node graph
///
/// Cloning a `LazyArray` is cheap; clones share the same graph.
#[derive(Debug, Clone)]
pub struct LazyArray {
    shape: Vec<usize>,
    dtype: &'static str,
    node: Arc<LazyNode>,
}

impl LazyArray {
    /// Wrap an in-memory masked array for deferred processing
    #[must_use]
    pub fn from_masked(a: MaskedArrayD) -> Self {
        Self {
            shape: a.shape().to_vec(),
            dtype: "f32",
            node: Arc::new(LazyNode::Source(a)),
        }
    }

    /// Wrap an unmasked in-memory array for deferred processing
    #[must_use]
    pub fn from_array(data: ArrayD<f32>) -> Self {
        Self::from_masked(MaskedArrayD::from_array(data))
    }

    /// Logical shape of the deferred result
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions of the deferred result
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Element dtype label of the deferred result
    #[must_use]
    pub fn dtype(&self) -> &'static str {
        self.dtype
    }

    /// Number of pending reduction nodes above the source data
    ///
    /// Zero for a freshly wrapped array; registering a reduction adds one.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &*self.node {
            LazyNode::Source(_) => 0,
            LazyNode::Reduce { input, .. } => 1 + input.depth(),
        }
    }

    /// Register a pending reduction, returning a new deferred handle
    ///
    /// Validates the axis selection against the declared shape and derives
    /// the post-collapse shape (plus any `extra` trailing dimensions from
    /// the aggregator's shape policy) without computing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis selection is invalid for this shape.
    pub fn deferred_reduce(
        &self,
        kernel: EagerKernel,
        axes: &[usize],
        params: &AggParams,
        extra: &[usize],
    ) -> Result<LazyArray> {
        kernels::validate_axes(self.ndim(), axes)?;

        let mut shape = kernels::collapsed_shape(&self.shape, axes);
        shape.extend_from_slice(extra);

        Ok(LazyArray {
            shape,
            dtype: self.dtype,
            node: Arc::new(LazyNode::Reduce {
                input: self.clone(),
                kernel,
                axes: axes.to_vec(),
                params: params.clone(),
            }),
        })
    }

    /// Materialize the deferred array, evaluating every pending node
    ///
    /// # Errors
    ///
    /// Returns the first kernel error encountered while evaluating the
    /// graph.
    pub fn compute(&self) -> Result<MaskedArrayD> {
        match &*self.node {
            LazyNode::Source(a) => Ok(a.clone()),
            LazyNode::Reduce {
                input,
                kernel,
                axes,
                params,
            } => {
                let source = input.compute()?;
                kernel(&source, axes, params)
            }
        }
    }
}

impl From<MaskedArrayD> for LazyArray {
    fn from(a: MaskedArrayD) -> Self {
        Self::from_masked(a)
    }
}

impl From<ArrayD<f32>> for LazyArray {
    fn from(data: ArrayD<f32>) -> Self {
        Self::from_array(data)
    }
}
