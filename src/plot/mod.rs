//! Chart rendering for the PDF report.
//!
//! Two raster artifacts per run:
//!
//! - daily revenue: vertical bars, one per calendar day
//! - top supporters: horizontal bars, highest total at the top
//!
//! Both are transient PNG files, deleted by the [`ChartImages`] guard once the
//! run ends, whether or not report assembly succeeded.

pub mod charts;

pub use charts::*;
