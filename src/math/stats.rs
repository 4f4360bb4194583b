//! Count-weighted statistical primitives.
//!
//! A `WeightedSample` stands for the multiset in which every value occurs
//! `count` times. Order statistics are looked up through cumulative counts,
//! so the multiset is never materialized.

#[derive(Debug, Clone)]
pub struct WeightedSample {
    values: Vec<f64>,
    counts: Vec<u64>,
    cumulative: Vec<u64>,
    total: u64,
}

impl WeightedSample {
    /// Builds a sample from parallel value/count slices. Zero counts are
    /// dropped, values are sorted ascending and equal values merged.
    ///
    /// Returns `None` when the total count does not fit in `u64`.
    pub fn new(values: &[f64], counts: &[u64]) -> Option<Self> {
        let mut pairs: Vec<(f64, u64)> = values
            .iter()
            .copied()
            .zip(counts.iter().copied())
            .filter(|&(_, c)| c > 0)
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged_values: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut merged_counts: Vec<u64> = Vec::with_capacity(pairs.len());
        for (v, c) in pairs {
            match merged_values.last() {
                Some(&last) if last == v => {
                    if let Some(slot) = merged_counts.last_mut() {
                        *slot = slot.checked_add(c)?;
                    }
                }
                _ => {
                    merged_values.push(v);
                    merged_counts.push(c);
                }
            }
        }

        let mut cumulative = Vec::with_capacity(merged_counts.len());
        let mut total = 0u64;
        for &c in &merged_counts {
            total = total.checked_add(c)?;
            cumulative.push(total);
        }

        Some(Self {
            values: merged_values,
            counts: merged_counts,
            cumulative,
            total,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self
            .values
            .iter()
            .zip(&self.counts)
            .map(|(v, &c)| v * c as f64)
            .sum();
        Some(sum / self.total as f64)
    }

    /// `k`-th smallest observation, 0-based.
    pub fn order_stat(&self, k: u64) -> Option<f64> {
        if k >= self.total {
            return None;
        }
        let idx = self.cumulative.partition_point(|&c| c <= k);
        self.values.get(idx).copied()
    }

    /// Quantile by linear interpolation between order statistics
    /// (Hyndman & Fan type 7, the R and NumPy default).
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.is_empty() || !(0.0..=1.0).contains(&p) {
            return None;
        }
        let h = (self.total - 1) as f64 * p;
        let j = h.floor() as u64;
        let g = h - j as f64;
        let lo = self.order_stat(j)?;
        if j + 1 >= self.total {
            return Some(lo);
        }
        let hi = self.order_stat(j + 1)?;
        Some(lo + g * (hi - lo))
    }

    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    /// Most frequent value; the smallest one when several share the
    /// maximal count.
    pub fn mode(&self) -> Option<f64> {
        let max = self.counts.iter().copied().max()?;
        self.counts
            .iter()
            .position(|&c| c == max)
            .map(|idx| self.values[idx])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1). Undefined below two observations.
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
