use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let version = &ctx.tool_version;
    let mut out = String::new();
    out.push_str(&format!("kira-evsize v{}\n", version));
    out.push_str(&format!(
        "Input: {} files, {} bins\n",
        ctx.measurements.len(),
        ctx.axis.len()
    ));

    for dim in &ctx.dimensions {
        out.push_str(&format!(
            "Dimension {}: {} groups, {} skipped\n",
            dim.name,
            dim.aggregated.len(),
            dim.skipped.len()
        ));
        for s in &dim.statistics {
            out.push_str(&format!(
                "  {}: n={} mode={:.1} D10={:.1} D50={:.1} D90={:.1}\n",
                s.key, s.total, s.mode, s.d10, s.d50, s.d90
            ));
        }
    }

    out
}

/// Short report for `validate`: files, bins and group counts.
pub fn format_validation(ctx: &Ctx) -> String {
    let mut out = String::new();
    out.push_str("kira-evsize validate ok\n");
    out.push_str(&format!("files: {}\n", ctx.measurements.len()));
    out.push_str(&format!("bins: {}\n", ctx.axis.len()));
    for dim in &ctx.dimensions {
        out.push_str(&format!("{}: {} groups\n", dim.name, dim.aggregated.len()));
    }
    out
}
