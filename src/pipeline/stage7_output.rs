use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage7Output;

impl Stage7Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Output {
    fn name(&self) -> &'static str {
        "stage7_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        fs::create_dir_all(&ctx.output.out_dir)
            .with_context(|| format!("failed to create {}", ctx.output.out_dir.display()))?;
        info!(out_dir = %ctx.output.out_dir.display(), "output_dir_ready");

        if ctx.write_tsv {
            for dim in &ctx.dimensions {
                let dir = ctx.output.dimension_dir(&dim.name);
                tsv_writer::write_dimension_tables(&dir, dim)?;
                info!(dimension = %dim.name, dir = %dir.display(), "tables_written");
            }
        }
        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, ctx)?;
            info!(path = %ctx.output.json_path.display(), "report_written");
        }
        info!("stage7_output_ready");
        Ok(())
    }
}
