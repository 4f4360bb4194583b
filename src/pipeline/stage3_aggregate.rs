use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::layout::GroupKey;
use crate::pipeline::Stage;
use crate::series::DimensionResult;
use crate::series::aggregate::aggregate;

pub struct Stage3Aggregate;

impl Stage3Aggregate {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Aggregate {
    fn name(&self) -> &'static str {
        "stage3_aggregate"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.labels.len() != ctx.measurements.len() {
            bail!(
                "{} labels for {} measurements",
                ctx.labels.len(),
                ctx.measurements.len()
            );
        }
        let dimensions = ctx.selected_dimensions()?;
        let layout = ctx.layout()?;

        let mut results = Vec::with_capacity(dimensions.len());
        for dim in &dimensions {
            let keys: Vec<GroupKey> = ctx
                .labels
                .iter()
                .map(|label| layout.group_key(dim, label))
                .collect();
            let aggregated = aggregate(&ctx.axis, &ctx.measurements, &keys)?;
            info!(
                dimension = %dim.name,
                groups = aggregated.len(),
                "dimension_aggregated"
            );
            results.push(DimensionResult::new(&dim.name, aggregated));
        }

        ctx.dimensions = results;
        Ok(())
    }
}
