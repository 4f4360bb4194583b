use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::series::{DimensionResult, SampleStatistics};

pub const COUNTS_TSV: &str = "counts.tsv";
pub const PROPORTIONS_TSV: &str = "proportions.tsv";
pub const STATISTICS_TSV: &str = "statistics.tsv";

const STAT_ROWS: [&str; 7] = ["total", "mean", "median", "mode", "D10", "D50", "D90"];

pub fn write_dimension_tables(dir: &Path, dim: &DimensionResult) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    write_counts_tsv(&dir.join(COUNTS_TSV), dim)?;
    write_proportions_tsv(&dir.join(PROPORTIONS_TSV), dim)?;
    write_statistics_tsv(&dir.join(STATISTICS_TSV), dim)?;
    Ok(())
}

pub fn write_counts_tsv(path: &Path, dim: &DimensionResult) -> Result<()> {
    let mut w = create(path)?;
    let n_bins = dim.aggregated.first().map_or(0, |s| s.diameters.len());
    for s in &dim.aggregated {
        ensure_len(s.counts.len(), n_bins, &s.key.label)?;
    }

    write!(w, "diameter_nm")?;
    for s in &dim.aggregated {
        write!(w, "\t{}", s.key)?;
    }
    writeln!(w)?;

    for i in 0..n_bins {
        write!(w, "{}", dim.aggregated[0].diameters[i])?;
        for s in &dim.aggregated {
            write!(w, "\t{}", s.counts[i])?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Proportion curves plus the across-group mean and error bar per bin.
pub fn write_proportions_tsv(path: &Path, dim: &DimensionResult) -> Result<()> {
    let mut w = create(path)?;
    let dispersion = dim
        .dispersion
        .as_ref()
        .context("dispersion missing")?;
    let n_bins = dispersion.bins.len();
    for p in &dim.proportions {
        ensure_len(p.values.len(), n_bins, &p.key.label)?;
    }

    write!(w, "diameter_nm")?;
    for p in &dim.proportions {
        write!(w, "\t{}", p.key)?;
    }
    writeln!(w, "\tmean\tsd")?;

    for (i, bin) in dispersion.bins.iter().enumerate() {
        write!(w, "{}", bin.diameter)?;
        for p in &dim.proportions {
            write!(w, "\t{:.6}", p.values[i])?;
        }
        writeln!(w, "\t{:.6}\t{:.6}", bin.mean, bin.error_bar())?;
    }
    w.flush()?;
    Ok(())
}

/// One row per statistic, one column per group.
pub fn write_statistics_tsv(path: &Path, dim: &DimensionResult) -> Result<()> {
    let mut w = create(path)?;

    write!(w, "statistic")?;
    for s in &dim.statistics {
        write!(w, "\t{}", s.key)?;
    }
    writeln!(w)?;

    for row in STAT_ROWS {
        write!(w, "{}", row)?;
        for s in &dim.statistics {
            match row {
                "total" => write!(w, "\t{}", s.total)?,
                _ => write!(w, "\t{:.6}", stat_value(s, row))?,
            }
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

fn stat_value(s: &SampleStatistics, row: &str) -> f64 {
    match row {
        "mean" => s.mean,
        "median" => s.median,
        "mode" => s.mode,
        "D10" => s.d10,
        "D50" => s.d50,
        "D90" => s.d90,
        _ => s.total as f64,
    }
}

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn ensure_len(got: usize, expected: usize, name: &str) -> Result<()> {
    if got != expected {
        bail!("{} length mismatch: {} != {}", name, got, expected);
    }
    Ok(())
}
