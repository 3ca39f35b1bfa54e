//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves the token
//! - validates the reporting period before any network traffic
//! - runs the fetch -> aggregate -> chart -> render pipeline
//! - prints per-stage progress

use clap::Parser;

use crate::cli::{Cli, TOKEN_ENV};
use crate::domain::{ReportConfig, month_label, validate_period};
use crate::error::ReportError;

pub mod pipeline;

/// Entry point for the `report` binary.
pub fn run() -> Result<(), ReportError> {
    let cli = Cli::parse();
    let config = config_from_cli(cli)?;

    println!(
        "Generating donation report for {}...",
        month_label(config.year, config.month)
    );

    let output = pipeline::run_report(&config)?;

    println!(
        "Report generated successfully: {}",
        output.report_path.display()
    );
    Ok(())
}

/// Validate CLI input and resolve the access token.
pub fn config_from_cli(cli: Cli) -> Result<ReportConfig, ReportError> {
    validate_period(cli.year, cli.month)?;
    let token = resolve_token(cli.token)?;
    Ok(ReportConfig {
        api_url: cli.api_url,
        token,
        year: cli.year,
        month: cli.month,
        output: cli.output,
    })
}

/// `--token` wins; otherwise the environment (with `.env` support) supplies
/// the token.
fn resolve_token(flag: Option<String>) -> Result<String, ReportError> {
    if let Some(token) = flag {
        if !token.trim().is_empty() {
            return Ok(token);
        }
    }
    dotenvy::dotenv().ok();
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ReportError::validation(format!(
            "missing API token: pass --token or set {TOKEN_ENV}"
        ))),
    }
}
