use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `qnx` binary.
#[derive(Debug, Parser)]
#[command(
    name = "qnx",
    version,
    about = "Quannex - organizational coherence on a dodecahedron"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dataset directory holding kpis.json and optionally topology.json
    /// (overrides `data.dir` from config)
    #[arg(short, long, global = true, conflicts_with = "demo")]
    pub data: Option<PathBuf>,

    /// Use the bundled demo dataset
    #[arg(long, global = true)]
    pub demo: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            data: self.data.clone(),
            demo: self.demo,
        }
    }
}
