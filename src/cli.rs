use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-evsize",
    version,
    about = "EV particle-size aggregation for Zetaview runs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
    Layout(LayoutArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Directory with one Zetaview size file per sample")]
    pub input: PathBuf,

    #[arg(long, help = "Filename layout (YAML)")]
    pub layout: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(long = "dimension", help = "Restrict to a layout dimension (repeatable)")]
    pub dimensions: Vec<String>,

    #[arg(long, default_value_t = 0, help = "Number of reader threads (0 = auto)")]
    pub threads: usize,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Directory with one Zetaview size file per sample")]
    pub input: PathBuf,

    #[arg(long, help = "Filename layout (YAML)")]
    pub layout: PathBuf,
}

#[derive(Debug, Args)]
pub struct LayoutArgs {
    #[command(subcommand)]
    pub command: LayoutCommand,
}

#[derive(Debug, Subcommand)]
pub enum LayoutCommand {
    Show(LayoutShowArgs),
}

#[derive(Debug, Args)]
pub struct LayoutShowArgs {
    #[arg(long, help = "Filename layout (YAML)")]
    pub layout: PathBuf,

    #[arg(long, help = "Optional input directory to label")]
    pub input: Option<PathBuf>,
}
