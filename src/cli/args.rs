use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::formatting::ColorMode;
use crate::io::{InputFormat, OutputFormat};
use crate::metrics::{ChangeMetric, ContributorRanking};

#[derive(Parser, Debug)]
#[command(name = "bound")]
#[command(
    about = "Attribute commits to code owners with the adjusted contribution metric",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (default: nearest .bound.toml)
    #[arg(long, global = true, env = "BOUND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split every commit between the owners of the files it touches
    Attribute {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Roll per-commit attributions up into per-owner totals
    Summary {
        #[command(flatten)]
        report: ReportArgs,

        #[command(flatten)]
        summary: SummaryArgs,
    },

    /// Write a default .bound.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by the reporting commands
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Commit records (JSON, YAML or TSV); `-` reads stdin
    pub input: PathBuf,

    /// Per-file weight: insertions-only (v1) or insertions-and-deletions (v2)
    #[arg(short, long, value_enum)]
    pub metric: Option<ChangeMetric>,

    /// Input format (default: inferred from the file extension)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decimal places for fractions in text output
    #[arg(long)]
    pub precision: Option<usize>,

    /// Attribute commits on a single thread
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Worker threads (0 = one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// When to use colors
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Plain output: no colors
    #[arg(long)]
    pub plain: bool,
}

/// Options of the summary command
#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Contributors to list per owner
    #[arg(long)]
    pub top: Option<usize>,

    /// Order contributors by adjusted share, changed lines or commits
    #[arg(long, value_enum)]
    pub rank_by: Option<ContributorRanking>,

    /// Author to code-owner TSV (author_email, author_name, codeowner)
    #[arg(long)]
    pub memberships: Option<PathBuf>,
}
