//! The report pipeline shared by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> aggregate -> chart -> assemble PDF
//!
//! Each stage's output is the next stage's sole input; there is no shared
//! mutable context.

use std::path::PathBuf;

use crate::analysis::analyze;
use crate::data::PlatformClient;
use crate::domain::{MonthlyAnalysis, ReportConfig, month_window};
use crate::error::ReportError;
use crate::plot::render_charts;
use crate::report::{default_report_path, write_report};

/// All outputs of a single report run.
#[derive(Debug)]
pub struct RunOutput {
    pub analysis: MonthlyAnalysis,
    pub report_path: PathBuf,
}

/// Execute the full pipeline and return the computed outputs.
///
/// Empty-month policy: a month with zero donation records terminates the run
/// with [`ReportError::EmptyMonth`] before any chart or PDF work; no report
/// file is produced for an empty month.
pub fn run_report(config: &ReportConfig) -> Result<RunOutput, ReportError> {
    let (start, end) = month_window(config.year, config.month)?;
    println!(
        "Fetching donations for {}-{:02} ({start} to {end})...",
        config.year, config.month
    );

    let client = PlatformClient::new(&config.api_url, &config.token)?;
    let records = client.fetch_month(config.year, config.month)?;
    println!("Retrieved {} donations", records.len());

    if records.is_empty() {
        return Err(ReportError::EmptyMonth {
            year: config.year,
            month: config.month,
        });
    }

    let analysis = analyze(&records, config.year, config.month);
    println!("Analysis complete");

    // The guard deletes both PNGs when this function returns, embedded or not.
    let charts = render_charts(&analysis, config.year, config.month, &std::env::temp_dir())?;
    println!(
        "Visualizations created: {}, {}",
        charts.daily_revenue.display(),
        charts.top_supporters.display()
    );

    let out_path = config
        .output
        .clone()
        .unwrap_or_else(|| default_report_path(config.year, config.month));
    let report_path = write_report(&analysis, &charts, config.year, config.month, &out_path)?;

    Ok(RunOutput {
        analysis,
        report_path,
    })
}
