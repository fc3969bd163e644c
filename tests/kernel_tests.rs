//! Tests of the statistic kernels
//!
//! These exercise the reduction kernels directly: multi-axis collapse,
//! rank-based statistics, masked lane handling and the parallel
//! processing configuration.

use axagg::{
    errors::Result,
    kernels::{
        max_axis, mean_axis, median_axis, min_axis, percentile_axis, std_dev_axis, sum_axis,
        variance_axis,
    },
    masked::MaskedArrayD,
    parallel::{get_parallel_info, ParallelConfig},
    params::AggParams,
};
use approx::assert_relative_eq;
use ndarray::{array, ArrayD};

fn scalar(result: &MaskedArrayD) -> f32 {
    assert_eq!(result.len(), 1);
    *result.data().iter().next().unwrap()
}

#[test]
fn test_reducers_on_2d_axis_choice() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn());
    let params = AggParams::empty();

    let rows = sum_axis(&cube, &[1], &params)?;
    assert_eq!(rows.shape(), &[2]);
    assert_eq!(rows.data().iter().copied().collect::<Vec<_>>(), vec![6.0, 15.0]);

    let cols = min_axis(&cube, &[0], &params)?;
    assert_eq!(cols.shape(), &[3]);
    assert_eq!(cols.data().iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    Ok(())
}

#[test]
fn test_multi_axis_collapse_to_scalar() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![[1.0_f32, 2.0], [3.0, 4.0]].into_dyn());
    let result = max_axis(&cube, &[0, 1], &AggParams::empty())?;
    assert_eq!(result.ndim(), 0);
    assert_eq!(scalar(&result), 4.0);
    Ok(())
}

#[test]
fn test_multi_axis_masked_mean_is_exact() -> Result<()> {
    // Mean over both axes must weight by valid counts, not average the
    // per-axis means
    let data = array![[1.0_f32, 2.0], [3.0, 4.0]].into_dyn();
    let mask = array![[false, false], [true, false]].into_dyn();
    let cube = MaskedArrayD::new(data, mask)?;

    let result = mean_axis(&cube, &[0, 1], &AggParams::empty())?;
    assert_relative_eq!(scalar(&result), 7.0 / 3.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_multi_axis_on_3d_keeps_middle_dimension() -> Result<()> {
    let cube = MaskedArrayD::from_array(ArrayD::from_shape_vec(
        vec![2, 3, 4],
        (0..24).map(|i| i as f32).collect(),
    )?);

    let result = sum_axis(&cube, &[2, 0], &AggParams::empty())?;
    assert_eq!(result.shape(), &[3]);
    // Row j sums elements i*12 + j*4 + k over i in 0..2, k in 0..4
    let expected: Vec<f32> = (0..3)
        .map(|j| {
            (0..2)
                .flat_map(|i| (0..4).map(move |k| (i * 12 + j * 4 + k) as f32))
                .sum()
        })
        .collect();
    assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn test_mean_and_variance_values() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![1.0_f32, 2.0, 3.0, 4.0, 5.0].into_dyn());

    let mean = mean_axis(&cube, &[0], &AggParams::empty())?;
    assert_eq!(scalar(&mean), 3.0);

    // ddof defaults to zero at the kernel level
    let population = variance_axis(&cube, &[0], &AggParams::empty())?;
    assert_eq!(scalar(&population), 2.0);

    let sample = variance_axis(&cube, &[0], &AggParams::with_ddof(1))?;
    assert_eq!(scalar(&sample), 2.5);

    let std = std_dev_axis(&cube, &[0], &AggParams::with_ddof(1))?;
    assert_relative_eq!(scalar(&std), 2.5_f32.sqrt(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_median_even_and_odd() -> Result<()> {
    let odd = MaskedArrayD::from_array(array![5.0_f32, 1.0, 3.0].into_dyn());
    assert_eq!(scalar(&median_axis(&odd, &[0], &AggParams::empty())?), 3.0);

    let even = MaskedArrayD::from_array(array![4.0_f32, 1.0, 2.0, 3.0].into_dyn());
    assert_eq!(scalar(&median_axis(&even, &[0], &AggParams::empty())?), 2.5);
    Ok(())
}

#[test]
fn test_median_skips_masked() -> Result<()> {
    let masked = MaskedArrayD::masked_greater(array![1.0_f32, 2.0, 3.0, 4.0, 5.0].into_dyn(), 3.0);
    assert_eq!(scalar(&median_axis(&masked, &[0], &AggParams::empty())?), 2.0);
    Ok(())
}

#[test]
fn test_percentile_expands_trailing_dimension() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn());
    let params = AggParams::empty().percentiles(vec![0.0, 100.0]);

    let result = percentile_axis(&cube, &[1], &params)?;
    // Two lanes, two ranks each: trailing dimension of length 2
    assert_eq!(result.shape(), &[2, 2]);
    assert_eq!(
        result.data().iter().copied().collect::<Vec<_>>(),
        vec![1.0, 3.0, 4.0, 6.0]
    );
    Ok(())
}

#[test]
fn test_percentile_single_rank_keeps_collapsed_shape() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn());
    let params = AggParams::empty().percentiles(vec![50.0]);

    let result = percentile_axis(&cube, &[1], &params)?;
    assert_eq!(result.shape(), &[2]);
    assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![2.0, 5.0]);
    Ok(())
}

#[test]
fn test_percentile_interpolates() -> Result<()> {
    let cube = MaskedArrayD::from_array(array![10.0_f32, 20.0].into_dyn());
    let params = AggParams::empty().percentiles(vec![25.0]);
    let result = percentile_axis(&cube, &[0], &params)?;
    assert_relative_eq!(scalar(&result), 12.5, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_percentile_fully_masked_lane() -> Result<()> {
    let data = array![[1.0_f32, 2.0], [3.0, 4.0]].into_dyn();
    let mask = array![[true, true], [false, false]].into_dyn();
    let cube = MaskedArrayD::new(data, mask)?;
    let params = AggParams::empty().percentiles(vec![25.0, 75.0]);

    let result = percentile_axis(&cube, &[1], &params)?;
    assert_eq!(result.shape(), &[2, 2]);
    assert_eq!(
        result.mask().iter().copied().collect::<Vec<_>>(),
        vec![true, true, false, false]
    );
    Ok(())
}

#[test]
fn test_masked_array_helpers() {
    let cube = MaskedArrayD::masked_greater(array![1.0_f32, 2.0, 3.0, 4.0, 5.0].into_dyn(), 3.0);
    assert!(cube.any_masked());
    assert_eq!(cube.count_valid(), 3);
    assert_eq!(
        cube.filled(0.0).iter().copied().collect::<Vec<_>>(),
        vec![1.0, 2.0, 3.0, 0.0, 0.0]
    );
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::new_default();
    assert!(default_config.num_threads.is_none());

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.unwrap() > 0);

    let current = default_config.current_threads();
    assert!(current > 0);
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);

    // Test info printing (doesn't panic)
    info.print_info();
}
