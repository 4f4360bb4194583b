use std::path::PathBuf;

use kira_evsize::EvError;
use kira_evsize::layout::GroupKey;
use kira_evsize::series::aggregate::aggregate;
use kira_evsize::series::dispersion::compute_dispersion;
use kira_evsize::series::normalize::normalize;
use kira_evsize::series::statistics::compute_statistics;
use kira_evsize::series::{AggregatedSeries, RawMeasurement};

fn axis() -> Vec<f64> {
    vec![10.0, 20.0, 30.0, 40.0]
}

fn meas(name: &str, counts: &[u64]) -> RawMeasurement {
    RawMeasurement {
        path: PathBuf::from(name),
        diameters: axis(),
        counts: counts.to_vec(),
    }
}

fn series(label: &str, counts: &[u64]) -> AggregatedSeries {
    AggregatedSeries {
        key: GroupKey::single(label),
        diameters: axis(),
        counts: counts.to_vec(),
        n_files: 1,
    }
}

#[test]
fn aggregate_sums_per_key_in_first_seen_order() {
    let ms = vec![
        meas("a", &[1, 2, 3, 4]),
        meas("b", &[0, 1, 0, 1]),
        meas("c", &[5, 5, 5, 5]),
        meas("d", &[1, 0, 0, 0]),
    ];
    let keys = vec![
        GroupKey::single("R2"),
        GroupKey::single("R1"),
        GroupKey::single("R2"),
        GroupKey::single("R1"),
    ];
    let out = aggregate(&axis(), &ms, &keys).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].key.label, "R2");
    assert_eq!(out[0].counts, vec![6, 7, 8, 9]);
    assert_eq!(out[0].n_files, 2);
    assert_eq!(out[1].key.label, "R1");
    assert_eq!(out[1].counts, vec![1, 1, 0, 1]);
    for s in &out {
        assert_eq!(s.diameters, axis());
    }
    let total: u64 = out.iter().map(|s| s.total()).sum();
    assert_eq!(total, 10 + 2 + 20 + 1);
}

#[test]
fn aggregate_rejects_short_measurement() {
    let ms = vec![meas("a", &[1, 2, 3, 4]), meas("b", &[1, 2])];
    let keys = vec![GroupKey::single("x"), GroupKey::single("x")];
    let err = aggregate(&axis(), &ms, &keys).unwrap_err();
    assert!(matches!(err, EvError::AxisMismatch { .. }));
}

#[test]
fn aggregate_reports_count_overflow() {
    let half = u64::MAX / 2 + 1;
    let ms = vec![meas("a", &[half, 0, 0, 0]), meas("b", &[half, 0, 0, 0])];
    let keys = vec![GroupKey::single("big"), GroupKey::single("big")];
    match aggregate(&axis(), &ms, &keys).unwrap_err() {
        EvError::CountOverflow { key } => assert_eq!(key, "big"),
        other => panic!("unexpected error: {other}"),
    }

    // each bin fits, the group total does not
    let ms = vec![meas("a", &[half, half, 0, 0])];
    let keys = vec![GroupKey::single("wide")];
    let err = aggregate(&axis(), &ms, &keys).unwrap_err();
    assert!(matches!(err, EvError::CountOverflow { .. }));
    assert!(!err.is_group_local());
}

#[test]
fn aggregate_rejects_colliding_labels() {
    let ms = vec![meas("a", &[1, 0, 0, 0]), meas("b", &[0, 1, 0, 0])];
    let keys = vec![
        GroupKey::new(
            vec![("x".to_string(), "a_b".to_string()), ("y".to_string(), "c".to_string())],
            "_",
        ),
        GroupKey::new(
            vec![("x".to_string(), "a".to_string()), ("y".to_string(), "b_c".to_string())],
            "_",
        ),
    ];
    assert_eq!(keys[0].label, keys[1].label);
    let err = aggregate(&axis(), &ms, &keys).unwrap_err();
    match err {
        EvError::InvalidLayout(reason) => assert!(reason.contains("'a_b_c'")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn normalize_peaks_at_one() {
    let p = normalize(&series("g", &[2, 8, 4, 0])).unwrap();
    assert_eq!(p.values, vec![0.25, 1.0, 0.5, 0.0]);
    assert_eq!(p.diameters, axis());
}

#[test]
fn normalize_all_zero_is_degenerate() {
    let err = normalize(&series("dead", &[0, 0, 0, 0])).unwrap_err();
    match err {
        EvError::DegenerateSeries { key } => assert_eq!(key, "dead"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(normalize(&series("none", &[])).is_err());
}

#[test]
fn statistics_for_group() {
    let s = compute_statistics(&series("g", &[3, 3, 1, 0])).unwrap();
    assert_eq!(s.total, 7);
    assert_eq!(s.mode, 10.0);
    assert_eq!(s.median, 20.0);
    assert!((s.mean - 120.0 / 7.0).abs() < 1e-9);
    assert!(s.d10 <= s.d50 && s.d50 <= s.d90);
    assert_eq!(s.d50, s.median);
}

#[test]
fn statistics_empty_sample() {
    let err = compute_statistics(&series("empty", &[0, 0, 0, 0])).unwrap_err();
    assert!(matches!(err, EvError::EmptySample { .. }));
    assert!(err.is_group_local());
}

#[test]
fn statistics_total_overflow_is_fatal() {
    let err = compute_statistics(&series("huge", &[u64::MAX, 1, 0, 0])).unwrap_err();
    assert!(matches!(err, EvError::CountOverflow { .. }));
    assert!(!err.is_group_local());
}

#[test]
fn dispersion_across_groups() {
    let a = normalize(&series("a", &[1, 2, 0, 0])).unwrap();
    let b = normalize(&series("b", &[2, 2, 0, 1])).unwrap();
    let d = compute_dispersion(&[a, b]).unwrap();
    assert_eq!(d.n_groups, 2);
    assert_eq!(d.bins.len(), 4);
    assert!((d.bins[0].mean - 0.75).abs() < 1e-12);
    let sd = d.bins[0].sd.unwrap();
    assert!((sd - (0.125f64).sqrt()).abs() < 1e-12);
    assert_eq!(d.bins[1].sd, Some(0.0));
}

#[test]
fn dispersion_single_group_draws_zero_error_bar() {
    let a = normalize(&series("a", &[1, 2, 0, 0])).unwrap();
    let d = compute_dispersion(&[a]).unwrap();
    for bin in &d.bins {
        assert_eq!(bin.sd, None);
        assert_eq!(bin.error_bar(), 0.0);
    }
    assert_eq!(d.bins[1].mean, 1.0);
}

#[test]
fn dispersion_of_no_groups_is_empty() {
    let d = compute_dispersion(&[]).unwrap();
    assert_eq!(d.n_groups, 0);
    assert!(d.bins.is_empty());
}
