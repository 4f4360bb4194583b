use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::EvError;
use crate::layout::RunLayout;

/// Measurement files of a run directory, sorted by file name.
pub fn discover_measurement_files(input_dir: &Path, layout: &RunLayout) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(EvError::malformed(input_dir, "not a directory").into());
    }
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to list {}", input_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", input_dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if layout.matches_file(name) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(EvError::malformed(
            input_dir,
            format!("no files match '{}'", layout.spec.file_pattern),
        )
        .into());
    }
    Ok(files)
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input")
        .to_string()
}
