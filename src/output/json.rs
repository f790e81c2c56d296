//! JSON output formatting for pomotrack.

use serde::Serialize;
use serde_json::json;

use crate::config::{Config, Paths};
use crate::error::PomoError;

/// Format the effective configuration and file locations as JSON
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn format_config_json(config: &Config, paths: &Paths) -> Result<String, PomoError> {
    let output = json!({
        "config": config,
        "paths": {
            "root": paths.root,
            "config_file": paths.config_file,
            "history_file": paths.history_file,
        }
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::history::TotalStats;
    use std::path::PathBuf;

    #[test]
    fn test_format_config_json() {
        let paths = Paths::with_root(PathBuf::from("/tmp/pomo"));
        let output = format_config_json(&Config::default(), &paths).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["config"]["timer"]["work_duration_minutes"], 25);
        assert_eq!(value["config"]["goal"]["daily_goal_hours"], 4);
        assert_eq!(value["paths"]["history_file"], "/tmp/pomo/history.json");
    }

    #[test]
    fn test_to_json() {
        let stats = TotalStats {
            total_work_minutes: 50,
            total_break_minutes: 10,
        };
        let output = to_json(&stats).unwrap();

        assert!(output.contains("\"total_work_minutes\": 50"));
        assert!(output.contains("\"total_break_minutes\": 10"));
    }
}
