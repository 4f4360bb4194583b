use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::io::tsv_writer::{COUNTS_TSV, PROPORTIONS_TSV, STATISTICS_TSV};
use crate::schema::v1::{
    DimensionReport, EvSizeV1, FieldEntry, GroupReport, GroupStatistics, InputMeta, KeyPart,
    LayoutSummary, SkippedEntry,
};

pub fn build_report(ctx: &Ctx) -> Result<EvSizeV1> {
    let layout = ctx.layout()?;

    let input = InputMeta {
        input_dir: ctx.input.display().to_string(),
        files: ctx.measurements.len() as u64,
        bins: ctx.axis.len() as u64,
        preamble_lines: layout.preamble_lines() as u64,
        data_rows: layout.data_rows() as u64,
        axis_check: layout.axis_check(),
        diameter_min: ctx.axis.iter().copied().reduce(f64::min),
        diameter_max: ctx.axis.iter().copied().reduce(f64::max),
    };

    let layout_summary = LayoutSummary {
        separator: layout.spec.separator.clone(),
        key_separator: layout.spec.key_separator.clone(),
        arity: layout.arity() as u64,
        fields: layout
            .slots
            .iter()
            .map(|s| FieldEntry {
                position: s.position as u64,
                role: s.role.clone(),
                pattern: s.pattern.clone(),
            })
            .collect(),
    };

    let mut dimensions = Vec::with_capacity(ctx.dimensions.len());
    for dim in &ctx.dimensions {
        let roles = layout
            .dimension(&dim.name)
            .map(|d| d.roles.clone())
            .with_context(|| format!("dimension '{}' missing from layout", dim.name))?;

        let groups = dim
            .aggregated
            .iter()
            .map(|series| {
                let statistics = dim
                    .statistics
                    .iter()
                    .find(|s| s.key == series.key)
                    .map(|s| GroupStatistics {
                        mean: s.mean,
                        median: s.median,
                        mode: s.mode,
                        d10: s.d10,
                        d50: s.d50,
                        d90: s.d90,
                    });
                GroupReport {
                    key: series.key.label.clone(),
                    parts: series
                        .key
                        .parts
                        .iter()
                        .map(|(role, value)| KeyPart {
                            role: role.clone(),
                            value: value.clone(),
                        })
                        .collect(),
                    n_files: series.n_files as u64,
                    total_count: series.total(),
                    statistics,
                }
            })
            .collect();

        let skipped = dim
            .skipped
            .iter()
            .map(|s| SkippedEntry {
                key: s.key.label.clone(),
                reason: s.reason.clone(),
            })
            .collect();

        let tables: Option<Vec<String>> = ctx.write_tsv.then(|| {
            [COUNTS_TSV, PROPORTIONS_TSV, STATISTICS_TSV]
                .iter()
                .map(|t| format!("{}/{}", dim.name, t))
                .collect()
        });

        dimensions.push(DimensionReport {
            name: dim.name.clone(),
            roles,
            groups,
            skipped,
            tables,
        });
    }

    Ok(EvSizeV1 {
        tool: "kira-evsize".to_string(),
        version: ctx.tool_version.clone(),
        schema_version: "v1".to_string(),
        input,
        layout: layout_summary,
        dimensions,
        warnings: ctx.warnings.clone(),
    })
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
