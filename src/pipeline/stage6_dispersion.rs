use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::series::dispersion::compute_dispersion;

pub struct Stage6Dispersion;

impl Stage6Dispersion {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Dispersion {
    fn name(&self) -> &'static str {
        "stage6_dispersion"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for dim in &mut ctx.dimensions {
            let dispersion = compute_dispersion(&dim.proportions)?;
            info!(
                dimension = %dim.name,
                groups = dispersion.n_groups,
                bins = dispersion.bins.len(),
                "dispersion_ready"
            );
            dim.dispersion = Some(dispersion);
        }
        Ok(())
    }
}
