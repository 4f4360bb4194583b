pub mod aggregate;
pub mod dispersion;
pub mod normalize;
pub mod statistics;

use std::path::PathBuf;

use crate::layout::GroupKey;

/// One instrument file: diameter bins and particle counts.
#[derive(Debug, Clone)]
pub struct RawMeasurement {
    pub path: PathBuf,
    pub diameters: Vec<f64>,
    pub counts: Vec<u64>,
}

impl RawMeasurement {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Bin-wise summed counts for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub key: GroupKey,
    pub diameters: Vec<f64>,
    pub counts: Vec<u64>,
    pub n_files: usize,
}

impl AggregatedSeries {
    /// Sum of all bins. Aggregation guarantees this fits in `u64`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }
}

/// Counts scaled by the series maximum; peaks at exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionSeries {
    pub key: GroupKey,
    pub diameters: Vec<f64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleStatistics {
    pub key: GroupKey,
    pub total: u64,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub d10: f64,
    pub d50: f64,
    pub d90: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinDispersion {
    pub diameter: f64,
    pub mean: f64,
    /// `None` when fewer than two groups contribute.
    pub sd: Option<f64>,
}

impl BinDispersion {
    /// Half-width of the error bar; undefined spread draws as zero.
    pub fn error_bar(&self) -> f64 {
        self.sd.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispersionSeries {
    pub n_groups: usize,
    pub bins: Vec<BinDispersion>,
}

#[derive(Debug, Clone)]
pub struct SkippedGroup {
    pub key: GroupKey,
    pub reason: String,
}

/// Everything computed for one grouping dimension.
#[derive(Debug, Clone)]
pub struct DimensionResult {
    pub name: String,
    pub aggregated: Vec<AggregatedSeries>,
    pub proportions: Vec<ProportionSeries>,
    pub statistics: Vec<SampleStatistics>,
    pub dispersion: Option<DispersionSeries>,
    pub skipped: Vec<SkippedGroup>,
}

impl DimensionResult {
    pub fn new(name: &str, aggregated: Vec<AggregatedSeries>) -> Self {
        Self {
            name: name.to_string(),
            aggregated,
            proportions: Vec::new(),
            statistics: Vec::new(),
            dispersion: None,
            skipped: Vec::new(),
        }
    }

    pub fn is_skipped(&self, key: &GroupKey) -> bool {
        self.skipped.iter().any(|s| &s.key == key)
    }
}
