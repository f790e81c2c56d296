//! Command implementations for pomotrack.
//!
//! This module contains the implementation of all CLI commands.

mod focus;
mod history;
mod shell;

pub use focus::start;
pub use history::{history, stats};
pub use shell::completions;

use std::path::PathBuf;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::core::SystemClock;
use crate::error::PomoError;
use crate::features::focus::{format_minutes, parse_in_range, Mode, GOAL_HOURS};
use crate::features::history::{HistoryStore, ProgressStatus};
use crate::output::{format_config, format_status, to_json};
use crate::storage::FileStorage;

/// Resolved file locations and loaded configuration shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    pub config: Config,
}

impl Context {
    /// Resolve paths (from `home` when given) and load the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// config file exists but cannot be parsed.
    pub fn load(home: Option<PathBuf>) -> Result<Self, PomoError> {
        let paths = match home {
            Some(root) => Paths::with_root(root),
            None => Paths::new()?,
        };
        let config = Config::load_from_path(&paths.config_file)?;
        log::debug!("using data directory {}", paths.root.display());

        Ok(Self { paths, config })
    }

    /// Open the history file with the configured goal and retention.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_history(&self) -> Result<HistoryStore, PomoError> {
        self.paths.ensure_dirs()?;
        Ok(HistoryStore::from_config(
            &self.config,
            FileStorage::new(&self.paths),
            SystemClock,
        ))
    }
}

/// Execute status command
///
/// # Errors
///
/// Returns an error if the history cannot be opened or output formatting fails.
pub fn status(ctx: &Context, format: OutputFormat) -> Result<String, PomoError> {
    let store = ctx.open_history()?;
    format_status(&ProgressStatus::of(&store), format)
}

/// Execute log command
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` for an unknown mode or zero minutes.
pub fn log_session(
    ctx: &Context,
    mode: &str,
    minutes: u32,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let mode = Mode::parse(mode).ok_or_else(|| {
        PomoError::InvalidInput(format!("Unknown session kind: {mode}. Use work or break"))
    })?;
    if minutes == 0 {
        return Err(PomoError::InvalidInput(
            "Minutes must be greater than zero".to_string(),
        ));
    }

    let mut store = ctx.open_history()?;
    store.record_session(mode, minutes);
    if mode == Mode::Work {
        store.add_progress(minutes);
    }
    let status = ProgressStatus::of(&store);

    match format {
        OutputFormat::Json => to_json(&json!({
            "mode": mode,
            "minutes": minutes,
            "progress": status,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} Logged {} of {}\n   Today: {} of {} ({:.0}%)",
            "✓".green(),
            format_minutes(u64::from(minutes)),
            mode,
            format_minutes(u64::from(status.minutes_completed)),
            format_minutes(u64::from(status.goal_minutes)),
            status.percent
        )),
    }
}

/// Execute goal command
///
/// Saves the new goal to the config file.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` if `hours` is not 1-24, or an error if
/// the config file cannot be written.
pub fn goal(ctx: &mut Context, hours: &str, format: OutputFormat) -> Result<String, PomoError> {
    let hours = parse_in_range(hours, &GOAL_HOURS).ok_or_else(|| {
        PomoError::InvalidInput(format!(
            "Daily goal must be a whole number of hours between {} and {}",
            GOAL_HOURS.start(),
            GOAL_HOURS.end()
        ))
    })?;

    ctx.config.goal.daily_goal_hours = hours;
    ctx.config.save_to_path(&ctx.paths.config_file)?;
    log::info!("daily goal set to {hours} hours");

    let store = ctx.open_history()?;
    let status = ProgressStatus::of(&store);
    match format {
        OutputFormat::Json => to_json(&status),
        OutputFormat::Pretty => Ok(format!(
            "{} Daily goal set to {}\n   Today: {} done ({:.0}%)",
            "✓".green(),
            format_minutes(u64::from(status.goal_minutes)),
            format_minutes(u64::from(status.minutes_completed)),
            status.percent
        )),
    }
}

/// Execute reset-progress command
///
/// # Errors
///
/// Returns an error if the history cannot be opened or output formatting fails.
pub fn reset_progress(ctx: &Context, format: OutputFormat) -> Result<String, PomoError> {
    let mut store = ctx.open_history()?;
    store.reset_progress();

    match format {
        OutputFormat::Json => to_json(&ProgressStatus::of(&store)),
        OutputFormat::Pretty => Ok(format!("{} Today's progress reset", "✓".green())),
    }
}

/// Execute config command
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn config(ctx: &Context, format: OutputFormat) -> Result<String, PomoError> {
    format_config(&ctx.config, &ctx.paths, format)
}
