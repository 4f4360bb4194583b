use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::input;
use crate::io::zetaview;
use crate::layout;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.layout.is_none() {
            let loaded = layout::load_layout(&ctx.layout_path)?;
            info!(
                layout = %ctx.layout_path.display(),
                arity = loaded.arity(),
                dimensions = loaded.dimensions().len(),
                "layout_loaded"
            );
            ctx.layout = Some(loaded);
        }
        let run_layout = ctx.layout()?;
        let (preamble_lines, data_rows, axis_check) = (
            run_layout.preamble_lines(),
            run_layout.data_rows(),
            run_layout.axis_check(),
        );

        let files = input::discover_measurement_files(&ctx.input, run_layout)?;
        info!(
            input = %ctx.input.display(),
            files = files.len(),
            "input_files"
        );

        let measurements = zetaview::read_all(&files, preamble_lines, data_rows, ctx.threads)?;
        let (axis, warnings) = zetaview::check_axis(&measurements, axis_check)?;
        for w in &warnings {
            warn!(warning = %w, "axis_mismatch_trusted");
        }

        info!(
            files = measurements.len(),
            bins = axis.len(),
            "measurements_loaded"
        );

        ctx.files = files;
        ctx.measurements = measurements;
        ctx.axis = axis;
        ctx.warnings.extend(warnings);
        Ok(())
    }
}
