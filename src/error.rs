use std::path::PathBuf;

use thiserror::Error;

/// Domain errors raised by ingest, labeling and the series transforms.
///
/// `DegenerateSeries` and `EmptySample` concern a single group and are
/// recoverable; everything else aborts the run.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("malformed input {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error(
        "diameter axis mismatch in {path} at bin {index}: expected {expected}, found {found}"
    )]
    AxisMismatch {
        path: PathBuf,
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error("filename '{file_name}' does not match layout: expected {expected}")]
    FilenameFormatMismatch { file_name: String, expected: String },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("count overflow in group '{key}': summed counts exceed {max}", max = u64::MAX)]
    CountOverflow { key: String },

    #[error("degenerate series for group '{key}': all counts are zero")]
    DegenerateSeries { key: String },

    #[error("empty sample for group '{key}': total count is zero")]
    EmptySample { key: String },
}

impl EvError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that only invalidate one group of a dimension.
    pub fn is_group_local(&self) -> bool {
        matches!(self, Self::DegenerateSeries { .. } | Self::EmptySample { .. })
    }
}

pub type EvResult<T> = std::result::Result<T, EvError>;
