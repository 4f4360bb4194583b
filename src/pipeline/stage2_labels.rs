use anyhow::Result;
use tracing::{debug, info};

use crate::ctx::Ctx;
use crate::input::file_name_of;
use crate::layout::label_files;
use crate::pipeline::Stage;

pub struct Stage2Labels;

impl Stage2Labels {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Labels {
    fn name(&self) -> &'static str {
        "stage2_labels"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let names: Vec<String> = ctx.files.iter().map(|p| file_name_of(p)).collect();
        let labels = label_files(ctx.layout()?, &names)?;
        for label in &labels {
            debug!(file = %label.file_name, fields = ?label.values, "file_labeled");
        }
        info!(files = labels.len(), "labels_ready");
        ctx.labels = labels;
        Ok(())
    }
}
