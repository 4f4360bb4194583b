use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::layout::{DimensionSpec, RunLayout, SampleLabel};
use crate::series::{DimensionResult, RawMeasurement};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
}

impl OutputPaths {
    pub fn dimension_dir(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }
}

/// Run state threaded through the pipeline stages.
#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub layout_path: PathBuf,
    pub layout: Option<RunLayout>,
    pub dimension_filter: Vec<String>,
    pub write_json: bool,
    pub write_tsv: bool,
    pub threads: usize,
    pub tool_version: String,
    pub files: Vec<PathBuf>,
    pub measurements: Vec<RawMeasurement>,
    pub axis: Vec<f64>,
    pub labels: Vec<SampleLabel>,
    pub dimensions: Vec<DimensionResult>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        layout_path: PathBuf,
        out_dir: PathBuf,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("evsize.json");
        Self {
            input,
            layout_path,
            layout: None,
            dimension_filter: Vec::new(),
            write_json,
            write_tsv,
            threads: 0,
            tool_version: tool_version.to_string(),
            files: Vec::new(),
            measurements: Vec::new(),
            axis: Vec::new(),
            labels: Vec::new(),
            dimensions: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths { out_dir, json_path },
        }
    }

    pub fn layout(&self) -> Result<&RunLayout> {
        self.layout.as_ref().context("layout not loaded")
    }

    /// Dimensions to process: all of them, or those named on the command line.
    pub fn selected_dimensions(&self) -> Result<Vec<DimensionSpec>> {
        let layout = self.layout()?;
        if self.dimension_filter.is_empty() {
            return Ok(layout.dimensions().to_vec());
        }
        let mut out = Vec::with_capacity(self.dimension_filter.len());
        for name in &self.dimension_filter {
            match layout.dimension(name) {
                Some(dim) => out.push(dim.clone()),
                None => {
                    let known: Vec<&str> =
                        layout.dimensions().iter().map(|d| d.name.as_str()).collect();
                    bail!(
                        "unknown dimension '{}' (layout defines: {})",
                        name,
                        known.join(", ")
                    );
                }
            }
        }
        Ok(out)
    }
}
