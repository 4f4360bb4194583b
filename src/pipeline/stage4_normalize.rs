use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::series::SkippedGroup;
use crate::series::normalize::normalize;

pub struct Stage4Normalize;

impl Stage4Normalize {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Normalize {
    fn name(&self) -> &'static str {
        "stage4_normalize"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut warnings = Vec::new();
        for dim in &mut ctx.dimensions {
            let mut proportions = Vec::with_capacity(dim.aggregated.len());
            for series in &dim.aggregated {
                match normalize(series) {
                    Ok(p) => proportions.push(p),
                    Err(err) if err.is_group_local() => {
                        warn!(dimension = %dim.name, group = %series.key, "degenerate_series_skipped");
                        warnings.push(format!("{}: {}", dim.name, err));
                        dim.skipped.push(SkippedGroup {
                            key: series.key.clone(),
                            reason: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            info!(
                dimension = %dim.name,
                groups = proportions.len(),
                "proportions_ready"
            );
            dim.proportions = proportions;
        }
        ctx.warnings.extend(warnings);
        Ok(())
    }
}
