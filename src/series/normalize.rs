use crate::error::{EvError, EvResult};
use crate::series::{AggregatedSeries, ProportionSeries};

/// Divides every bin by the series maximum.
pub fn normalize(series: &AggregatedSeries) -> EvResult<ProportionSeries> {
    let max = series.counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Err(EvError::DegenerateSeries {
            key: series.key.label.clone(),
        });
    }
    let max = max as f64;
    let values = series.counts.iter().map(|&c| c as f64 / max).collect();
    Ok(ProportionSeries {
        key: series.key.clone(),
        diameters: series.diameters.clone(),
        values,
    })
}
