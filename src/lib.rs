//! `donation-report` library crate.
//!
//! The binary (`report`) is a thin wrapper around this library so that:
//!
//! - every pipeline stage is testable without spawning processes
//! - stages stay independent, pure units connected by explicit hand-off
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod plot;
pub mod report;
