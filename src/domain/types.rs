//! Shared domain types.
//!
//! These types are intentionally lightweight: each pipeline stage consumes the
//! previous stage's output immutably, so everything here is plain data with no
//! shared mutable context.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One discrete contribution event, as fetched from the donation platform.
///
/// Immutable once fetched; owned by the pipeline invocation that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationRecord {
    pub supporter_id: String,
    pub supporter_name: String,
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
}

/// Per-supporter donation total, one entry of the top-supporters ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct SupporterTotal {
    pub name: String,
    pub total: Decimal,
    pub donations: usize,
}

/// Derived, read-only aggregate for one calendar month.
///
/// Computed once per run by [`crate::analysis::analyze`]; never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAnalysis {
    /// Count of donation events (one per record, repeat donors included).
    pub total_supporters: usize,
    /// Count of distinct supporter ids.
    pub unique_supporters: usize,
    /// Count of donation records; always equals `total_supporters`.
    pub total_donations: usize,
    pub total_revenue: Decimal,
    pub average_donation: Decimal,
    /// Highest totals first, at most ten entries.
    pub top_supporters: Vec<SupporterTotal>,
    /// Revenue per calendar day, ascending; zero-revenue days included.
    pub daily_revenue: BTreeMap<u32, Decimal>,
}

impl MonthlyAnalysis {
    /// The "no data" aggregate: all counts and sums at zero, empty rankings.
    pub fn empty() -> Self {
        Self {
            total_supporters: 0,
            unique_supporters: 0,
            total_donations: 0,
            total_revenue: Decimal::ZERO,
            average_donation: Decimal::ZERO,
            top_supporters: Vec::new(),
            daily_revenue: BTreeMap::new(),
        }
    }
}

/// Resolved configuration for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub api_url: String,
    pub token: String,
    pub year: i32,
    pub month: u32,
    /// Destination PDF path; `None` means `report-YYYY-MM.pdf` in the working
    /// directory.
    pub output: Option<PathBuf>,
}
