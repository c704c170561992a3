use crate::types::scoring::{ComplexityPolicy, ScoringProfile};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "guardfi",
    version,
    about = "Heuristic smart-contract security scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file used instead of ./guardfi.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a contract and print the result document
    Analyze(AnalyzeCommand),
    /// Print the raw pattern signals detected in a contract
    Signals(SignalsCommand),
    /// Quote an insurance premium from an extended analysis
    Premium(PremiumCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub contract: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    #[arg(long, value_enum)]
    pub profile: Option<ScoringProfile>,
    #[arg(long, value_enum)]
    pub complexity_policy: Option<ComplexityPolicy>,
    /// Vulnerability label to score instead of the detector's findings
    #[arg(long = "label")]
    pub labels: Vec<String>,
    /// Ask the configured narrator for a vulnerability narration
    #[arg(long)]
    pub narrate: bool,
    /// Exit with status 1 when the overall risk is High
    #[arg(long)]
    pub fail_on_high: bool,
}

#[derive(Args)]
pub struct SignalsCommand {
    pub contract: PathBuf,
}

#[derive(Args)]
pub struct PremiumCommand {
    pub contract: PathBuf,
    #[arg(long)]
    pub base_rate: Option<f64>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Sarif,
}
