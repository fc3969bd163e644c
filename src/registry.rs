//! The fixed, process-wide set of named aggregators
//!
//! Every statistic is a statically constructed [`Aggregator`] singleton;
//! the binding between a name and its kernels is established here, at
//! link time, with no runtime registration. The table is immutable and
//! safe for unsynchronized concurrent reads.
//!
//! `MEDIAN` and `PERCENTILE` carry no lazy kernel: rank-based statistics
//! need the whole lane in memory, so their lazy path reports
//! `LazyUnsupported` and callers decide whether to materialize and fall
//! back to the eager path.

use crate::aggregator::{no_extra_shape, percentile_shape, Aggregator};
use crate::kernels;
use crate::metadata::{CellMethod, CubeMetadata};
use crate::params::AggParams;

/// Records the statistic as a cell method on the result container
fn cell_method(name: &str, metadata: &mut CubeMetadata, coords: &[String], _params: &AggParams) {
    metadata.add_cell_method(CellMethod::new(name, coords));
}

/// Variance metadata: cell method plus squared units
fn variance_metadata(name: &str, metadata: &mut CubeMetadata, coords: &[String], params: &AggParams) {
    cell_method(name, metadata, coords, params);
    if let Some(units) = metadata.units.take() {
        metadata.units = Some(format!("({units})^2"));
    }
}

/// Maximum along the collapsed axes
pub static MAX: Aggregator = Aggregator::new(
    "maximum",
    kernels::max_axis,
    Some(kernels::max_lazy),
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Minimum along the collapsed axes
pub static MIN: Aggregator = Aggregator::new(
    "minimum",
    kernels::min_axis,
    Some(kernels::min_lazy),
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Arithmetic mean along the collapsed axes
pub static MEAN: Aggregator = Aggregator::new(
    "mean",
    kernels::mean_axis,
    Some(kernels::mean_lazy),
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Sum along the collapsed axes
pub static SUM: Aggregator = Aggregator::new(
    "sum",
    kernels::sum_axis,
    Some(kernels::sum_lazy),
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Standard deviation along the collapsed axes, `ddof = 1` by default
pub static STD_DEV: Aggregator = Aggregator::new(
    "standard_deviation",
    kernels::std_dev_axis,
    Some(kernels::std_dev_lazy),
    no_extra_shape,
    AggParams::with_ddof(1),
)
.with_metadata_hook(cell_method);

/// Variance along the collapsed axes, `ddof = 1` by default
pub static VARIANCE: Aggregator = Aggregator::new(
    "variance",
    kernels::variance_axis,
    Some(kernels::variance_lazy),
    no_extra_shape,
    AggParams::with_ddof(1),
)
.with_metadata_hook(variance_metadata);

/// Median along the collapsed axes; eager only
pub static MEDIAN: Aggregator = Aggregator::new(
    "median",
    kernels::median_axis,
    None,
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Percentiles along the collapsed axes; eager only, requires the
/// `percentiles` parameter
pub static PERCENTILE: Aggregator = Aggregator::new(
    "percentile",
    kernels::percentile_axis,
    None,
    percentile_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// Count of valid elements along the collapsed axes
pub static COUNT: Aggregator = Aggregator::new(
    "count",
    kernels::count_axis,
    Some(kernels::count_lazy),
    no_extra_shape,
    AggParams::empty(),
)
.with_metadata_hook(cell_method);

/// All registered aggregators
pub static REGISTRY: [&Aggregator; 9] = [
    &MAX, &MIN, &MEAN, &SUM, &STD_DEV, &VARIANCE, &MEDIAN, &PERCENTILE, &COUNT,
];

/// Looks up an aggregator by its display name
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Aggregator> {
    REGISTRY.iter().find(|agg| agg.name() == name).copied()
}
