use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage1_input;
pub mod stage2_labels;
pub mod stage3_aggregate;
pub mod stage4_normalize;
pub mod stage5_stats;
pub mod stage6_dispersion;
pub mod stage7_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Ingest and labeling only.
    pub fn validation() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_labels::Stage2Labels::new()),
            Box::new(stage3_aggregate::Stage3Aggregate::new()),
        ])
    }

    /// Every stage; nothing touches the output directory before stage 7.
    pub fn full() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_labels::Stage2Labels::new()),
            Box::new(stage3_aggregate::Stage3Aggregate::new()),
            Box::new(stage4_normalize::Stage4Normalize::new()),
            Box::new(stage5_stats::Stage5Stats::new()),
            Box::new(stage6_dispersion::Stage6Dispersion::new()),
            Box::new(stage7_output::Stage7Output::new()),
        ])
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
