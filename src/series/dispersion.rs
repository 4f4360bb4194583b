use anyhow::{Result, bail};

use crate::math::stats::{mean, sample_sd};
use crate::series::{BinDispersion, DispersionSeries, ProportionSeries};

/// Per-bin mean and spread of proportions across the groups of a dimension.
pub fn compute_dispersion(series: &[ProportionSeries]) -> Result<DispersionSeries> {
    let Some(first) = series.first() else {
        return Ok(DispersionSeries {
            n_groups: 0,
            bins: Vec::new(),
        });
    };
    let n_bins = first.diameters.len();
    for s in series {
        if s.values.len() != n_bins {
            bail!(
                "group '{}' has {} bins, expected {}",
                s.key,
                s.values.len(),
                n_bins
            );
        }
    }

    let mut column = Vec::with_capacity(series.len());
    let mut bins = Vec::with_capacity(n_bins);
    for i in 0..n_bins {
        column.clear();
        column.extend(series.iter().map(|s| s.values[i]));
        bins.push(BinDispersion {
            diameter: first.diameters[i],
            mean: mean(&column).unwrap_or(0.0),
            sd: sample_sd(&column),
        });
    }

    Ok(DispersionSeries {
        n_groups: series.len(),
        bins,
    })
}
