use crate::error::{EvError, EvResult};
use crate::math::stats::WeightedSample;
use crate::series::{AggregatedSeries, SampleStatistics};

/// Summary of the count-weighted diameter sample of one group.
pub fn compute_statistics(series: &AggregatedSeries) -> EvResult<SampleStatistics> {
    let sample = WeightedSample::new(&series.diameters, &series.counts).ok_or_else(|| {
        EvError::CountOverflow {
            key: series.key.label.clone(),
        }
    })?;
    let empty = || EvError::EmptySample {
        key: series.key.label.clone(),
    };
    if sample.is_empty() {
        return Err(empty());
    }

    Ok(SampleStatistics {
        key: series.key.clone(),
        total: sample.total(),
        mean: sample.mean().ok_or_else(empty)?,
        median: sample.median().ok_or_else(empty)?,
        mode: sample.mode().ok_or_else(empty)?,
        d10: sample.quantile(0.1).ok_or_else(empty)?,
        d50: sample.quantile(0.5).ok_or_else(empty)?,
        d90: sample.quantile(0.9).ok_or_else(empty)?,
    })
}
