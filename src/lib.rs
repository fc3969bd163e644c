//! axagg: eager and lazy axis aggregation for N-dimensional arrays
//!
//! A Rust library for collapsing axes of labeled N-dimensional numeric
//! arrays into summary statistics (maximum, mean, percentiles, ...) with a
//! single declarative definition per statistic. Every aggregator exposes
//! an immediate in-memory path and, where the statistic permits, a
//! deferred path that registers the reduction on a lazy array handle and
//! computes nothing until materialization. Both paths produce numerically
//! identical results, masked (invalid/missing) elements included.
//!
//! ## Key Features
//!
//! - **Uniform Call Contract**: one `aggregate`/`lazy_aggregate` API over
//!   every statistic
//! - **Masked Data**: invalid elements are excluded from statistics; fully
//!   masked slices yield masked results
//! - **Deferred Execution**: lazy handles carry shape and dtype up front
//!   and replay the eager kernels at materialization time
//! - **Parallel Processing**: reduction lanes are processed with Rayon
//! - **Static Registry**: the named aggregators are immutable singletons,
//!   safe for unsynchronized concurrent reads
//!
//! ## Module Organization
//!
//! - [`aggregator`]: the `Aggregator` abstraction and shape policies
//! - [`registry`]: the fixed set of named aggregator singletons
//! - [`kernels`]: eager and lazy statistic kernels
//! - [`masked`]: masked array representation
//! - [`lazy`]: deferred array handles and the node graph
//! - [`params`]: explicit aggregation parameters
//! - [`metadata`]: result-container metadata touched by aggregation
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Examples
//!
//! ### Eager aggregation
//! ```rust
//! use axagg::prelude::*;
//! use ndarray::array;
//!
//! let data = array![1.0_f32, 2.0, 3.0, 4.0, 5.0].into_dyn();
//! let cube = MaskedArrayD::from_array(data);
//!
//! let result = MAX.aggregate(&cube, &[0], &AggParams::empty()).unwrap();
//! assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![5.0]);
//! ```
//!
//! ### Lazy aggregation
//! ```rust
//! use axagg::prelude::*;
//! use ndarray::array;
//!
//! let data = array![[1.0_f32, 2.0], [3.0, 4.0]].into_dyn();
//! let deferred = LazyArray::from_array(data);
//!
//! // Nothing is computed here; only the shape is derived.
//! let pending = MEAN.lazy_aggregate(&deferred, &[0], &AggParams::empty()).unwrap();
//! assert_eq!(pending.shape(), &[2]);
//!
//! let result = pending.compute().unwrap();
//! assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0]);
//! ```

// Core modules
pub mod aggregator;
pub mod errors;
pub mod kernels;
pub mod lazy;
pub mod masked;
pub mod metadata;
pub mod parallel;
pub mod params;
pub mod registry;

// Direct re-exports for the public API
pub use aggregator::*;
pub use errors::*;
pub use lazy::*;
pub use masked::*;
pub use metadata::*;
pub use parallel::*;
pub use params::*;
pub use registry::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::aggregator::Aggregator;
    pub use crate::errors::{AggregatorError, Result};
    pub use crate::lazy::LazyArray;
    pub use crate::masked::MaskedArrayD;
    pub use crate::metadata::{CellMethod, CubeMetadata};
    pub use crate::parallel::ParallelConfig;
    pub use crate::params::{AggParams, ParamValue};
    pub use crate::registry::{
        lookup, COUNT, MAX, MEAN, MEDIAN, MIN, PERCENTILE, REGISTRY, STD_DEV, SUM, VARIANCE,
    };
}
