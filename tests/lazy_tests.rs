//! Tests of the deferred aggregation path
//!
//! Lazy aggregation must register a reduction without computing, report
//! the post-collapse shape up front, and materialize to exactly what the
//! eager path computes, masked elements included.

use axagg::{
    errors::{AggregatorError, Result},
    lazy::LazyArray,
    masked::MaskedArrayD,
    params::AggParams,
    registry::{COUNT, MAX, MEAN, MEDIAN, MIN, PERCENTILE, STD_DEV, SUM, VARIANCE},
};
use approx::assert_relative_eq;
use ndarray::{array, ArrayD};

fn one_to_five() -> ArrayD<f32> {
    array![1.0_f32, 2.0, 3.0, 4.0, 5.0].into_dyn()
}

/// 2x3x4 test cube with a deterministic value pattern and a sparse mask
fn patterned_cube() -> MaskedArrayD {
    let data = ArrayD::from_shape_vec(
        vec![2, 3, 4],
        (0..24).map(|i| (i * 7 % 11) as f32).collect(),
    )
    .unwrap();
    // Mask a scattering of elements, plus one lane entirely
    let mask = ArrayD::from_shape_vec(
        vec![2, 3, 4],
        (0..24).map(|i| i % 5 == 0 || (i % 12) / 4 == 1 && i % 4 == 2).collect(),
    )
    .unwrap();
    MaskedArrayD::new(data, mask).unwrap()
}

#[test]
fn test_lazy_is_deferred() -> Result<()> {
    let deferred = LazyArray::from_array(one_to_five());
    assert_eq!(deferred.depth(), 0);
    assert_eq!(deferred.dtype(), "f32");

    let pending = MAX.lazy_aggregate(&deferred, &[0], &AggParams::empty())?;
    // A reduction node was registered, nothing was computed
    assert_eq!(pending.depth(), 1);
    assert_eq!(pending.shape(), &[] as &[usize]);
    Ok(())
}

#[test]
fn test_lazy_collapse() -> Result<()> {
    let deferred = LazyArray::from_array(one_to_five());
    let pending = MAX.lazy_aggregate(&deferred, &[0], &AggParams::empty())?;
    let result = pending.compute()?;
    assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![5.0]);
    Ok(())
}

#[test]
fn test_lazy_masked_collapse() -> Result<()> {
    let masked = MaskedArrayD::masked_greater(one_to_five(), 3.0);
    let deferred = LazyArray::from_masked(masked);
    let pending = MAX.lazy_aggregate(&deferred, &[0], &AggParams::empty())?;
    let result = pending.compute()?;
    assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![3.0]);
    assert!(!result.any_masked());
    Ok(())
}

#[test]
fn test_lazy_unsupported() {
    let deferred = LazyArray::from_array(one_to_five());
    let err = MEDIAN
        .lazy_aggregate(&deferred, &[0], &AggParams::empty())
        .unwrap_err();
    match err {
        AggregatorError::LazyUnsupported { name } => assert_eq!(name, "median"),
        other => panic!("expected LazyUnsupported, got {other:?}"),
    }

    assert!(!PERCENTILE.supports_lazy());
    assert!(MAX.supports_lazy());
}

#[test]
fn test_lazy_axis_validated_without_computing() {
    let deferred = LazyArray::from_array(one_to_five());
    let err = MAX
        .lazy_aggregate(&deferred, &[2], &AggParams::empty())
        .unwrap_err();
    assert!(matches!(err, AggregatorError::UnsupportedAxis { axis: 2, ndim: 1 }));
}

#[test]
fn test_lazy_shape_matches_eager_shape() -> Result<()> {
    let cube = patterned_cube();
    let deferred = LazyArray::from_masked(cube.clone());

    for axis in 0..cube.ndim() {
        let pending = MEAN.lazy_aggregate(&deferred, &[axis], &AggParams::empty())?;
        let eager = MEAN.aggregate(&cube, &[axis], &AggParams::empty())?;
        assert_eq!(pending.shape(), eager.shape());
    }
    Ok(())
}

#[test]
fn test_eager_lazy_equivalence_all_statistics() -> Result<()> {
    let cube = patterned_cube();
    let deferred = LazyArray::from_masked(cube.clone());
    let params = AggParams::empty();

    for aggregator in [&MAX, &MIN, &MEAN, &SUM, &STD_DEV, &VARIANCE, &COUNT] {
        for axis in 0..cube.ndim() {
            let eager = aggregator.aggregate(&cube, &[axis], &params)?;
            let lazy = aggregator
                .lazy_aggregate(&deferred, &[axis], &params)?
                .compute()?;

            assert_eq!(eager.shape(), lazy.shape(), "{} axis {axis}", aggregator.name());
            assert_eq!(eager.mask(), lazy.mask(), "{} axis {axis}", aggregator.name());
            for (e, l) in eager.filled(0.0).iter().zip(lazy.filled(0.0).iter()) {
                assert_relative_eq!(*e, *l);
            }
        }
    }
    Ok(())
}

#[test]
fn test_lazy_chained_reductions() -> Result<()> {
    // Collapse one axis lazily, then another on the pending result
    let cube = patterned_cube();
    let deferred = LazyArray::from_masked(cube.clone());

    let first = SUM.lazy_aggregate(&deferred, &[0], &AggParams::empty())?;
    let second = MAX.lazy_aggregate(&first, &[1], &AggParams::empty())?;
    assert_eq!(second.depth(), 2);
    assert_eq!(second.shape(), &[3]);

    let expected_first = SUM.aggregate(&cube, &[0], &AggParams::empty())?;
    let expected = MAX.aggregate(&expected_first, &[1], &AggParams::empty())?;
    let actual = second.compute()?;
    assert_eq!(expected.mask(), actual.mask());
    for (e, a) in expected.filled(0.0).iter().zip(actual.filled(0.0).iter()) {
        assert_relative_eq!(*e, *a);
    }
    Ok(())
}

#[test]
fn test_lazy_handles_share_the_graph() -> Result<()> {
    let deferred = LazyArray::from_array(one_to_five());
    let pending = MEAN.lazy_aggregate(&deferred, &[0], &AggParams::empty())?;
    let clone = pending.clone();

    // Both handles materialize to the same values independently
    assert_eq!(
        pending.compute()?.data().iter().copied().collect::<Vec<_>>(),
        clone.compute()?.data().iter().copied().collect::<Vec<_>>()
    );
    Ok(())
}
