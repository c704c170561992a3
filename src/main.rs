mod analyze;
mod cli;
mod config;
mod error;
mod narrator;
mod premium;
mod report;
mod scan;
mod types;

use crate::analyze::AnalyzeOptions;
use crate::error::GuardError;
use crate::narrator::{HttpNarrator, Narrator};
use crate::report::Subject;
use crate::types::config::{GuardConfig, NarratorConfig};
use crate::types::report::AnalysisResult;
use crate::types::scoring::{RiskLevel, ScoringProfile};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const HIGH_RISK: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_source(path: &Path) -> Result<String, GuardError> {
    if !path.exists() {
        return Err(GuardError::SourceNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| GuardError::SourceUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_config(explicit: Option<&Path>) -> Result<GuardConfig, GuardError> {
    let cwd = std::env::current_dir()?;
    config::load_config(&cwd, explicit)
}

/// Builds the HTTP narrator when requested. A narrator that cannot be built
/// is logged and skipped.
fn build_narrator(requested: bool, config: &NarratorConfig) -> Option<HttpNarrator> {
    if !requested {
        return None;
    }
    match HttpNarrator::from_config(config) {
        Ok(narrator) => {
            info!(model = narrator.model(), "narrator enabled");
            Some(narrator)
        }
        Err(error) => {
            warn!(%error, "narrator unavailable, using pattern-only scoring");
            None
        }
    }
}

fn score_contract(
    cmd: &cli::AnalyzeCommand,
    cfg: &GuardConfig,
) -> Result<(AnalysisResult, Subject), GuardError> {
    let profile = cmd.profile.unwrap_or(cfg.scoring.profile);
    cfg.validate_for(profile)?;

    let mut options = AnalyzeOptions::from_config(cfg, profile);
    if let Some(policy) = cmd.complexity_policy {
        options.complexity_policy = policy;
    }
    options.labels = cmd.labels.clone();

    let source = read_source(&cmd.contract)?;
    let narrator = build_narrator(cmd.narrate || cfg.narrator.enabled, &cfg.narrator);
    let result = analyze::analyze(
        &source,
        &options,
        narrator.as_ref().map(|narrator| narrator as &dyn Narrator),
    );
    let subject = Subject::new(
        cmd.contract.display().to_string(),
        Some(source.as_bytes()),
    );
    Ok((result, subject))
}

fn run(cli: cli::Cli) -> Result<i32, GuardError> {
    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Sarif => report::OutputFormat::Sarif,
            };

            // The failure document follows the configured profile whenever
            // the configuration itself could be loaded.
            let loaded = load_config(cli.config.as_deref());
            let profile = cmd
                .profile
                .or_else(|| loaded.as_ref().ok().map(|cfg| cfg.scoring.profile));

            match loaded.and_then(|cfg| score_contract(&cmd, &cfg)) {
                Ok((result, subject)) => {
                    let rendered = report::render(&result, &subject, output_format)?;
                    println!("{rendered}");
                    if cmd.fail_on_high && result.overall_risk == RiskLevel::High {
                        Ok(exit_code::HIGH_RISK)
                    } else {
                        Ok(exit_code::SUCCESS)
                    }
                }
                Err(e) => {
                    error!(error = %e, "analysis failed");
                    let extended = profile
                        .map(ScoringProfile::includes_extended_dimensions)
                        .unwrap_or(false);
                    let result = AnalysisResult::failed(&e.to_string(), extended);
                    let subject = Subject::new(cmd.contract.display().to_string(), None);
                    let rendered = report::render(&result, &subject, output_format)?;
                    println!("{rendered}");
                    Ok(exit_code::RUNTIME_FAILURE)
                }
            }
        }
        cli::Commands::Signals(cmd) => {
            let source = read_source(&cmd.contract)?;
            let signals = scan::detect(&source);
            let findings = analyze::vulnerability::detect_findings(&signals)
                .into_iter()
                .map(|finding| finding.label())
                .collect::<Vec<_>>();
            let output = json!({
                "contract": cmd.contract.display().to_string(),
                "signals": signals,
                "findings": findings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Premium(cmd) => {
            let cfg = load_config(cli.config.as_deref())?;
            cfg.validate_for(ScoringProfile::Extended)?;
            let base_rate = cmd.base_rate.unwrap_or(cfg.premium.base_rate);
            if base_rate <= 0.0 || !base_rate.is_finite() {
                return Err(GuardError::ConfigParse(
                    "--base-rate must be a positive number".to_string(),
                ));
            }

            let source = read_source(&cmd.contract)?;
            let options = AnalyzeOptions::from_config(&cfg, ScoringProfile::Extended);
            let narrator = build_narrator(cfg.narrator.enabled, &cfg.narrator);
            let result = analyze::analyze(
                &source,
                &options,
                narrator.as_ref().map(|narrator| narrator as &dyn Narrator),
            );
            let quote = premium::estimate(&result, base_rate);

            let output = json!({
                "contract": cmd.contract.display().to_string(),
                "overall_score": result.overall_score,
                "overall_risk": result.overall_risk,
                "premium": quote,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
