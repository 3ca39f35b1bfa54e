//! Command-line parsing for the monthly donation report generator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline code; resolved, validated configuration lives in
//! [`crate::domain::ReportConfig`].

use std::path::PathBuf;

use clap::Parser;

use crate::data::DEFAULT_BASE_URL;

/// Environment variable consulted when `--token` is not given.
pub const TOKEN_ENV: &str = "DONATION_API_TOKEN";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "report",
    version,
    about = "Generate a monthly donation report PDF"
)]
pub struct Cli {
    /// API access token (falls back to the DONATION_API_TOKEN environment
    /// variable, .env honored).
    #[arg(short, long)]
    pub token: Option<String>,

    /// Year to generate the report for (four digits).
    #[arg(short, long)]
    pub year: i32,

    /// Month to generate the report for (1-12).
    #[arg(short, long)]
    pub month: u32,

    /// Base URL for the donation platform API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Output PDF path (defaults to report-YYYY-MM.pdf in the working
    /// directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
