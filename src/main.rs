use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kira_evsize::cli::{Cli, Commands, LayoutCommand, LayoutShowArgs};
use kira_evsize::ctx::Ctx;
use kira_evsize::input;
use kira_evsize::io;
use kira_evsize::layout::{self, RunLayout};
use kira_evsize::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            // Neither flag given means both outputs.
            let (json, tsv) = if !args.json && !args.tsv {
                (true, true)
            } else {
                (args.json, args.tsv)
            };
            let mut ctx = Ctx::new(
                args.input,
                args.layout,
                args.out,
                json,
                tsv,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.threads = args.threads;
            ctx.dimension_filter = args.dimensions;

            Pipeline::full().run(&mut ctx)?;
            print_summary(&ctx);
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                args.layout,
                PathBuf::from("."),
                false,
                false,
                env!("CARGO_PKG_VERSION"),
            );
            Pipeline::validation().run(&mut ctx)?;
            print!("{}", io::summary::format_validation(&ctx));
            print_warnings(&ctx.warnings);
        }
        Commands::Layout(args) => match args.command {
            LayoutCommand::Show(show) => handle_layout_show(show)?,
        },
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) {
    print!("{}", io::summary::format_summary(ctx));
    print_warnings(&ctx.warnings);
}

fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        println!("warnings:");
        for warning in warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_layout_show(args: LayoutShowArgs) -> Result<()> {
    let layout = layout::load_layout(&args.layout)?;
    print_layout(&layout);
    if let Some(dir) = args.input {
        print_labels(&layout, &dir)?;
    }
    Ok(())
}

fn print_layout(layout: &RunLayout) {
    println!(
        "layout: {} fields, separator '{}'",
        layout.arity(),
        layout.separator()
    );
    for slot in &layout.slots {
        println!(
            "{}\t{}\t{}",
            slot.position,
            slot.role,
            slot.pattern.as_deref().unwrap_or("-")
        );
    }
    for dim in layout.dimensions() {
        println!("dimension {}: {}", dim.name, dim.roles.join(", "));
    }
}

fn print_labels(layout: &RunLayout, dir: &Path) -> Result<()> {
    let files = input::discover_measurement_files(dir, layout)?;
    for path in &files {
        let name = input::file_name_of(path);
        let label = layout
            .label(&name)
            .with_context(|| format!("labeling {}", path.display()))?;
        let fields: Vec<String> = label
            .values
            .iter()
            .map(|(role, value)| format!("{}={}", role, value))
            .collect();
        println!("{}\t{}", name, fields.join("\t"));
    }
    Ok(())
}
