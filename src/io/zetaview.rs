//! Zetaview size-distribution text files.
//!
//! Layout: a fixed-length instrument preamble, then whitespace separated
//! rows whose first two columns are diameter (nm) and particle count.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[cfg(feature = "mt")]
use rayon::prelude::*;

use crate::error::{EvError, EvResult};
use crate::io::open_maybe_gz;
use crate::layout::AxisCheck;
use crate::series::RawMeasurement;

const AXIS_TOLERANCE: f64 = 1e-9;

/// Largest count an `f64` still represents exactly (2^53).
const MAX_FLOAT_COUNT: f64 = 9_007_199_254_740_992.0;

pub fn read_measurement(
    path: &Path,
    preamble_lines: usize,
    data_rows: usize,
) -> EvResult<RawMeasurement> {
    let reader = open_maybe_gz(path).map_err(|e| EvError::malformed(path, e.to_string()))?;
    let mut reader = BufReader::new(reader);
    let mut buf: Vec<u8> = Vec::new();

    // Preamble bytes are instrument metadata and need not be UTF-8.
    for n in 0..preamble_lines {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| EvError::malformed(path, e.to_string()))?;
        if read == 0 {
            return Err(EvError::malformed(
                path,
                format!(
                    "preamble truncated: {} of {} lines present",
                    n, preamble_lines
                ),
            ));
        }
    }

    let mut diameters = Vec::with_capacity(data_rows);
    let mut counts = Vec::with_capacity(data_rows);
    let mut line_no = preamble_lines;
    while counts.len() < data_rows {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| EvError::malformed(path, e.to_string()))?;
        if read == 0 {
            return Err(EvError::malformed(
                path,
                format!(
                    "expected {} data rows, found {}",
                    data_rows,
                    counts.len()
                ),
            ));
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (d, c) = parse_row(trimmed).map_err(|reason| {
            EvError::malformed(path, format!("line {}: {}", line_no, reason))
        })?;
        diameters.push(d);
        counts.push(c);
    }

    Ok(RawMeasurement {
        path: path.to_path_buf(),
        diameters,
        counts,
    })
}

fn parse_row(line: &str) -> Result<(f64, u64), String> {
    let mut parts = line.split_whitespace();
    let (Some(d), Some(c)) = (parts.next(), parts.next()) else {
        return Err("expected diameter and count columns".to_string());
    };
    let diameter: f64 = d
        .parse()
        .map_err(|_| format!("invalid diameter '{}'", d))?;
    if !diameter.is_finite() {
        return Err(format!("invalid diameter '{}'", d));
    }
    Ok((diameter, parse_count(c)?))
}

/// Plain integers are taken as is; exponent forms such as `3.000E+0` go
/// through `f64` and must be integral and at most 2^53.
fn parse_count(c: &str) -> Result<u64, String> {
    if let Ok(count) = c.parse::<u64>() {
        return Ok(count);
    }
    let count: f64 = c.parse().map_err(|_| format!("invalid count '{}'", c))?;
    if !count.is_finite() || count < 0.0 || count.fract() != 0.0 {
        return Err(format!("count '{}' is not a non-negative integer", c));
    }
    if count > MAX_FLOAT_COUNT {
        return Err(format!(
            "count '{}' is too large to represent exactly; write it as a plain integer",
            c
        ));
    }
    Ok(count as u64)
}

/// Reads every file, keeping the order of `paths`.
pub fn read_all(
    paths: &[PathBuf],
    preamble_lines: usize,
    data_rows: usize,
    threads: usize,
) -> EvResult<Vec<RawMeasurement>> {
    #[cfg(feature = "mt")]
    {
        if threads != 1 && paths.len() > 1 {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if threads > 0 {
                builder = builder.num_threads(threads);
            }
            if let Ok(pool) = builder.build() {
                return pool.install(|| {
                    paths
                        .par_iter()
                        .map(|p| read_measurement(p, preamble_lines, data_rows))
                        .collect()
                });
            }
            tracing::warn!("thread pool unavailable; reading files sequentially");
        }
    }
    #[cfg(not(feature = "mt"))]
    let _ = threads;

    paths
        .iter()
        .map(|p| read_measurement(p, preamble_lines, data_rows))
        .collect()
}

/// Compares every file's diameters against the first file's.
///
/// Returns the run axis plus warnings (only produced in `Trust` mode).
pub fn check_axis(
    measurements: &[RawMeasurement],
    mode: AxisCheck,
) -> EvResult<(Vec<f64>, Vec<String>)> {
    let Some(first) = measurements.first() else {
        return Ok((Vec::new(), Vec::new()));
    };
    let axis = first.diameters.clone();
    let mut warnings = Vec::new();

    for m in &measurements[1..] {
        let mismatch = first_mismatch(&axis, &m.diameters);
        let Some((index, expected, found)) = mismatch else {
            continue;
        };
        match mode {
            AxisCheck::Strict => {
                return Err(EvError::AxisMismatch {
                    path: m.path.clone(),
                    index,
                    expected,
                    found,
                });
            }
            AxisCheck::Trust => warnings.push(format!(
                "{} diameter axis differs from {} at bin {} ({} vs {}); using the first file's axis",
                m.file_name(),
                first.file_name(),
                index,
                found,
                expected
            )),
        }
    }

    Ok((axis, warnings))
}

fn first_mismatch(axis: &[f64], other: &[f64]) -> Option<(usize, f64, f64)> {
    for (i, (a, b)) in axis.iter().zip(other).enumerate() {
        if (a - b).abs() > AXIS_TOLERANCE {
            return Some((i, *a, *b));
        }
    }
    if axis.len() != other.len() {
        let i = axis.len().min(other.len());
        return Some((
            i,
            axis.get(i).copied().unwrap_or(f64::NAN),
            other.get(i).copied().unwrap_or(f64::NAN),
        ));
    }
    None
}
