//! The aggregator abstraction binding a statistic to its kernels
//!
//! An [`Aggregator`] bundles a display name, an eager reduction kernel, an
//! optional lazy kernel, a shape policy and default parameters behind one
//! uniform call contract. Instances are immutable values constructed once
//! at startup (see [`crate::registry`]) and are safe for unsynchronized
//! concurrent reads.
//!
//! Separating [`Aggregator::aggregate_shape`] from the reduction itself
//! lets orchestration code pre-compute result shapes and validate
//! coordinate compatibility before paying for a possibly expensive or
//! deferred reduction.

use crate::errors::{AggregatorError, Result};
use crate::kernels::{self, EagerKernel, LazyKernel};
use crate::lazy::LazyArray;
use crate::masked::MaskedArrayD;
use crate::metadata::CubeMetadata;
use crate::params::AggParams;

/// Shape of the extra trailing dimensions an aggregation introduces,
/// as a pure function of its parameters
pub type ShapePolicy = fn(&AggParams) -> Vec<usize>;

/// Post-collapse metadata adjustment, given the aggregator name, the
/// collapsed coordinate names and the merged parameters
pub type MetadataHook = fn(&str, &mut CubeMetadata, &[String], &AggParams);

/// Shape policy for plain reducers: no extra dimensions, whatever the
/// parameters hold
///
/// Unrecognized parameter entries are deliberately ignored so generic
/// calling code can pass a superset of options across all aggregators.
#[must_use]
pub fn no_extra_shape(_params: &AggParams) -> Vec<usize> {
    Vec::new()
}

/// Shape policy for percentile aggregation: one trailing dimension of
/// length `n` when `n > 1` percentile ranks are requested
#[must_use]
pub fn percentile_shape(params: &AggParams) -> Vec<usize> {
    match &params.percentiles {
        Some(ranks) if ranks.len() > 1 => vec![ranks.len()],
        _ => Vec::new(),
    }
}

/// A named, reusable definition of a statistical reduction
///
/// Binds eager and optional lazy kernels with a shape policy, default
/// parameters and an optional metadata hook. Immutable after
/// construction; every call operates only on caller-owned data.
#[derive(Debug)]
pub struct Aggregator {
    name: &'static str,
    eager_kernel: EagerKernel,
    lazy_kernel: Option<LazyKernel>,
    shape_policy: ShapePolicy,
    defaults: AggParams,
    metadata_hook: Option<MetadataHook>,
}

impl Aggregator {
    /// Create an aggregator with no metadata hook
    #[must_use]
    pub const fn new(
        name: &'static str,
        eager_kernel: EagerKernel,
        lazy_kernel: Option<LazyKernel>,
        shape_policy: ShapePolicy,
        defaults: AggParams,
    ) -> Self {
        Self {
            name,
            eager_kernel,
            lazy_kernel,
            shape_policy,
            defaults,
            metadata_hook: None,
        }
    }

    /// Attach a post-collapse metadata hook
    #[must_use]
    pub const fn with_metadata_hook(mut self, hook: MetadataHook) -> Self {
        self.metadata_hook = Some(hook);
        self
    }

    /// The fixed display name of the statistic
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this aggregator carries a lazy kernel
    #[must_use]
    pub const fn supports_lazy(&self) -> bool {
        self.lazy_kernel.is_some()
    }

    /// Collapses the given axes of an in-memory array, eagerly
    ///
    /// Caller parameters are merged over the aggregator's defaults, caller
    /// values winning. Masked-element semantics follow the kernel: masked
    /// elements are excluded, and a slice fully masked along the collapsed
    /// axes produces a masked output element.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAxis` if an axis is out of range,
    /// `InvalidParameter` if a required parameter is missing or the axis
    /// list is degenerate, and kernel errors otherwise.
    pub fn aggregate(
        &self,
        array: &MaskedArrayD,
        axes: &[usize],
        params: &AggParams,
    ) -> Result<MaskedArrayD> {
        kernels::validate_axes(array.ndim(), axes)?;
        let merged = params.merged_over(&self.defaults);
        (self.eager_kernel)(array, axes, &merged)
    }

    /// Registers the collapse on a deferred array without computing
    ///
    /// Returns a new deferred handle whose declared shape already reflects
    /// the collapse and the shape policy. Materializing it yields exactly
    /// what [`Aggregator::aggregate`] computes on the equivalent in-memory
    /// array.
    ///
    /// # Errors
    ///
    /// Returns `LazyUnsupported` if this statistic has no lazy kernel,
    /// `UnsupportedAxis` or `InvalidParameter` for a bad axis selection.
    pub fn lazy_aggregate(
        &self,
        deferred: &LazyArray,
        axes: &[usize],
        params: &AggParams,
    ) -> Result<LazyArray> {
        let lazy_kernel = self
            .lazy_kernel
            .ok_or_else(|| AggregatorError::LazyUnsupported {
                name: self.name.to_string(),
            })?;
        kernels::validate_axes(deferred.ndim(), axes)?;
        let merged = params.merged_over(&self.defaults);
        lazy_kernel(deferred, axes, &merged)
    }

    /// Shape of the extra trailing dimensions this aggregation introduces
    ///
    /// Pure in the parameters, independent of any array or axis. Empty for
    /// plain reducers. Unrecognized parameter entries are ignored, never
    /// an error.
    #[must_use]
    pub fn aggregate_shape(&self, params: &AggParams) -> Vec<usize> {
        let merged = params.merged_over(&self.defaults);
        (self.shape_policy)(&merged)
    }

    /// Adjusts result-container metadata after a collapse
    ///
    /// No-op unless this aggregator carries a metadata hook. `coords`
    /// names the collapsed coordinates.
    pub fn update_metadata(
        &self,
        metadata: &mut CubeMetadata,
        coords: &[String],
        params: &AggParams,
    ) {
        if let Some(hook) = self.metadata_hook {
            let merged = params.merged_over(&self.defaults);
            hook(self.name, metadata, coords, &merged);
        }
    }
}
