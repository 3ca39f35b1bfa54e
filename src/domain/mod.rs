//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fetched donation records (`DonationRecord`)
//! - the derived monthly aggregate (`MonthlyAnalysis`, `SupporterTotal`)
//! - run configuration (`ReportConfig`)
//! - calendar-month helpers (`month_window`, `days_in_month`, `month_label`)

pub mod calendar;
pub mod types;

pub use calendar::*;
pub use types::*;
