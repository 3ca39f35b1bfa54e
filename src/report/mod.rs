//! Report assembly: statistics formatting and the final PDF document.
//!
//! Formatting code is kept in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized

pub mod fonts;
pub mod format;
pub mod pdf;

pub use format::*;
pub use pdf::*;
