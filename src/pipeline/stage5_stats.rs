use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::series::SkippedGroup;
use crate::series::statistics::compute_statistics;

pub struct Stage5Stats;

impl Stage5Stats {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Stats {
    fn name(&self) -> &'static str {
        "stage5_stats"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut warnings = Vec::new();
        for dim in &mut ctx.dimensions {
            let mut statistics = Vec::with_capacity(dim.aggregated.len());
            let mut newly_skipped = Vec::new();
            for series in &dim.aggregated {
                if dim.is_skipped(&series.key) {
                    continue;
                }
                match compute_statistics(series) {
                    Ok(s) => statistics.push(s),
                    Err(err) if err.is_group_local() => {
                        warn!(dimension = %dim.name, group = %series.key, "empty_sample_skipped");
                        warnings.push(format!("{}: {}", dim.name, err));
                        newly_skipped.push(SkippedGroup {
                            key: series.key.clone(),
                            reason: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            info!(
                dimension = %dim.name,
                groups = statistics.len(),
                "statistics_ready"
            );
            dim.statistics = statistics;
            dim.skipped.extend(newly_skipped);
        }
        ctx.warnings.extend(warnings);
        Ok(())
    }
}
