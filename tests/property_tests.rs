//! Property tests for the aggregation and normalization invariants.

use std::path::PathBuf;

use kira_evsize::layout::GroupKey;
use kira_evsize::math::stats::WeightedSample;
use kira_evsize::series::RawMeasurement;
use kira_evsize::series::aggregate::aggregate;
use kira_evsize::series::normalize::normalize;
use proptest::prelude::*;

const BINS: usize = 16;

fn axis() -> Vec<f64> {
    (0..BINS).map(|i| 10.0 + i as f64 * 5.0).collect()
}

fn arb_counts() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0u64..500, BINS)
}

/// (group index, counts) per file
fn arb_files() -> impl Strategy<Value = Vec<(usize, Vec<u64>)>> {
    proptest::collection::vec((0usize..3, arb_counts()), 1..12)
}

fn build(files: &[(usize, Vec<u64>)]) -> (Vec<RawMeasurement>, Vec<GroupKey>) {
    let measurements = files
        .iter()
        .enumerate()
        .map(|(i, (_, counts))| RawMeasurement {
            path: PathBuf::from(format!("f{}.txt", i)),
            diameters: axis(),
            counts: counts.clone(),
        })
        .collect();
    let keys = files
        .iter()
        .map(|(g, _)| GroupKey::single(&format!("G{}", g)))
        .collect();
    (measurements, keys)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: per-group sums do not depend on file order
    #[test]
    fn prop_aggregation_is_order_independent(
        files in arb_files(),
        seed in any::<u64>()
    ) {
        let (ms, keys) = build(&files);
        let forward = aggregate(&axis(), &ms, &keys).unwrap();

        let mut shuffled = files.clone();
        // deterministic rotation + reversal as the permutation
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();
        let (ms2, keys2) = build(&shuffled);
        let permuted = aggregate(&axis(), &ms2, &keys2).unwrap();

        prop_assert_eq!(forward.len(), permuted.len());
        for s in &forward {
            let other = permuted.iter().find(|p| p.key == s.key).unwrap();
            prop_assert_eq!(&s.counts, &other.counts);
            prop_assert_eq!(s.n_files, other.n_files);
            prop_assert_eq!(&s.diameters, &axis());
        }
    }

    /// Property: no count is lost by aggregation
    #[test]
    fn prop_aggregation_preserves_totals(files in arb_files()) {
        let (ms, keys) = build(&files);
        let out = aggregate(&axis(), &ms, &keys).unwrap();
        let raw: u64 = files.iter().flat_map(|(_, c)| c.iter()).sum();
        let agg: u64 = out.iter().map(|s| s.total()).sum();
        prop_assert_eq!(raw, agg);
    }

    /// Property: proportions peak at exactly 1.0 and stay non-negative
    #[test]
    fn prop_normalized_max_is_one(counts in arb_counts()) {
        let (ms, keys) = build(&[(0, counts.clone())]);
        let series = aggregate(&axis(), &ms, &keys).unwrap().remove(0);
        match normalize(&series) {
            Ok(p) => {
                let max = p.values.iter().copied().fold(f64::MIN, f64::max);
                prop_assert_eq!(max, 1.0);
                prop_assert!(p.values.iter().all(|v| *v >= 0.0 && v.is_finite()));
            }
            Err(_) => prop_assert!(counts.iter().all(|&c| c == 0)),
        }
    }

    /// Property: D10 <= median <= D90, all within the populated bin range
    #[test]
    fn prop_percentiles_are_ordered(counts in arb_counts()) {
        let sample = WeightedSample::new(&axis(), &counts).unwrap();
        prop_assume!(!sample.is_empty());
        let d10 = sample.quantile(0.1).unwrap();
        let d50 = sample.median().unwrap();
        let d90 = sample.quantile(0.9).unwrap();
        prop_assert!(d10 <= d50 && d50 <= d90);
        let mode = sample.mode().unwrap();
        prop_assert!(axis().contains(&mode));
        let mean = sample.mean().unwrap();
        prop_assert!(mean >= axis()[0] && mean <= axis()[BINS - 1]);
    }
}
