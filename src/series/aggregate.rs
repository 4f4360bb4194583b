use std::collections::HashMap;

use crate::error::{EvError, EvResult};
use crate::layout::GroupKey;
use crate::series::{AggregatedSeries, RawMeasurement};

/// Sums counts bin-wise per group key.
///
/// `keys[i]` is the key of `measurements[i]`. Groups come out in first-seen
/// order so downstream columns follow input order. Two distinct keys that
/// render to the same label are rejected, since they would share a column.
pub fn aggregate(
    axis: &[f64],
    measurements: &[RawMeasurement],
    keys: &[GroupKey],
) -> EvResult<Vec<AggregatedSeries>> {
    if measurements.len() != keys.len() {
        return Err(EvError::InvalidLayout(format!(
            "{} measurements but {} group keys",
            measurements.len(),
            keys.len()
        )));
    }

    let mut index: HashMap<&GroupKey, usize> = HashMap::new();
    let mut labels: HashMap<&str, &GroupKey> = HashMap::new();
    let mut out: Vec<AggregatedSeries> = Vec::new();

    for (m, key) in measurements.iter().zip(keys) {
        if m.len() != axis.len() {
            return Err(EvError::AxisMismatch {
                path: m.path.clone(),
                index: m.len().min(axis.len()),
                expected: axis.len() as f64,
                found: m.len() as f64,
            });
        }
        if let Some(seen) = labels.insert(key.label.as_str(), key) {
            if seen != key {
                return Err(EvError::InvalidLayout(format!(
                    "group keys {} and {} both render as '{}'; choose a key_separator that does not occur in field values",
                    describe_parts(seen),
                    describe_parts(key),
                    key.label
                )));
            }
        }
        let slot = *index.entry(key).or_insert_with(|| {
            out.push(AggregatedSeries {
                key: key.clone(),
                diameters: axis.to_vec(),
                counts: vec![0; axis.len()],
                n_files: 0,
            });
            out.len() - 1
        });
        let series = &mut out[slot];
        for (acc, &c) in series.counts.iter_mut().zip(&m.counts) {
            match acc.checked_add(c) {
                Some(sum) => *acc = sum,
                None => return Err(overflow(&series.key)),
            }
        }
        if series.checked_total().is_none() {
            return Err(overflow(&series.key));
        }
        series.n_files += 1;
    }

    Ok(out)
}

fn overflow(key: &GroupKey) -> EvError {
    EvError::CountOverflow {
        key: key.label.clone(),
    }
}

fn describe_parts(key: &GroupKey) -> String {
    let parts: Vec<String> = key
        .parts
        .iter()
        .map(|(role, value)| format!("{}={}", role, value))
        .collect();
    format!("[{}]", parts.join(", "))
}
