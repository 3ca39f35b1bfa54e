//! Donation platform API integration.

pub mod platform;

pub use platform::*;
