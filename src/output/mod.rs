//! Output formatting for pomotrack.
//!
//! This module provides formatters for displaying progress and history in
//! various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::PomoError;
use crate::features::history::{HistoryReport, ProgressStatus, TotalStats};

pub use json::*;
pub use pretty::*;

/// Format today's progress based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_status(status: &ProgressStatus, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(status)),
        OutputFormat::Json => to_json(status),
    }
}

/// Format a history report based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_history(report: &HistoryReport, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(report.format()),
        OutputFormat::Json => to_json(report),
    }
}

/// Format lifetime totals based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &TotalStats, format: OutputFormat) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_config(
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match format {
        OutputFormat::Pretty => Ok(format_config_pretty(config, paths)),
        OutputFormat::Json => format_config_json(config, paths),
    }
}
