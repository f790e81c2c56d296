//! History and statistics commands.

use crate::cli::args::OutputFormat;
use crate::error::PomoError;
use crate::features::history::HistoryReport;
use crate::output::{format_history, format_stats};

use super::Context;

/// Most days `history` will list.
const MAX_DAYS: u32 = 366;

/// Show the last `days` days of history.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` if `days` is 0 or more than a year, or
/// an error if the history cannot be opened.
pub fn history(ctx: &Context, days: u32, format: OutputFormat) -> Result<String, PomoError> {
    if days == 0 || days > MAX_DAYS {
        return Err(PomoError::InvalidInput(format!(
            "Days must be between 1 and {MAX_DAYS}"
        )));
    }

    let store = ctx.open_history()?;
    let report = HistoryReport::generate(&store, days);
    format_history(&report, format)
}

/// Show lifetime totals.
///
/// # Errors
///
/// Returns an error if the history cannot be opened or output formatting fails.
pub fn stats(ctx: &Context, format: OutputFormat) -> Result<String, PomoError> {
    let store = ctx.open_history()?;
    format_stats(&store.get_total_time_stats(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::log_session;
    use tempfile::TempDir;

    #[test]
    fn test_history_json_has_requested_days() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::load(Some(temp_dir.path().to_path_buf())).unwrap();
        log_session(&ctx, "work", 25, OutputFormat::Json).unwrap();

        let output = history(&ctx, 3, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["days"].as_array().unwrap().len(), 3);
        assert_eq!(value["days"][0]["work_minutes"], 25);
        assert_eq!(value["totals"]["total_work_minutes"], 25);
    }

    #[test]
    fn test_history_rejects_zero_days() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::load(Some(temp_dir.path().to_path_buf())).unwrap();

        assert!(history(&ctx, 0, OutputFormat::Pretty).is_err());
    }

    #[test]
    fn test_stats_on_fresh_home() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::load(Some(temp_dir.path().to_path_buf())).unwrap();

        let output = stats(&ctx, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total_work_minutes"], 0);
        assert_eq!(value["total_break_minutes"], 0);
    }
}
