//! Command handlers.

pub mod analyze;
pub mod check;
pub mod config;
pub mod serve;

use debuglens_core::bytes_to_gb;

/// Format a byte count as gigabytes with two decimals.
pub(crate) fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes_to_gb(bytes))
}
