//! Configuration settings for pomotrack.
//!
//! Settings are loaded from `~/.pomotrack/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::error::PomoError;
use crate::features::focus::{BREAK_MINUTES, GOAL_HOURS, WORK_MINUTES};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Session durations.
    pub timer: TimerConfig,
    /// Daily goal.
    pub goal: GoalConfig,
    /// History retention.
    pub history: HistoryConfig,
}

/// Session duration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work session length in minutes (1-120).
    #[serde(default = "default_work_duration")]
    pub work_duration_minutes: u32,
    /// Break length in minutes (1-30).
    #[serde(default = "default_break_duration")]
    pub break_duration_minutes: u32,
}

/// Daily goal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GoalConfig {
    /// Work hours to aim for each day (1-24).
    #[serde(default = "default_goal_hours")]
    pub daily_goal_hours: u32,
}

/// History settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Days of daily records to keep.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

// Default value functions for serde
const fn default_work_duration() -> u32 {
    25
}

const fn default_break_duration() -> u32 {
    5
}

const fn default_goal_hours() -> u32 {
    4
}

const fn default_retention_days() -> u32 {
    30
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration_minutes: default_work_duration(),
            break_duration_minutes: default_break_duration(),
        }
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_goal_hours: default_goal_hours(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    /// Out-of-range values are clamped into their valid range.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        Ok(config.clamped())
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Daily goal in minutes.
    #[must_use]
    pub const fn daily_goal_minutes(&self) -> u32 {
        self.goal.daily_goal_hours * 60
    }

    /// Pull every value into its valid range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        let clamp = |v: u32, r: &std::ops::RangeInclusive<u32>| v.clamp(*r.start(), *r.end());

        self.timer.work_duration_minutes = clamp(self.timer.work_duration_minutes, &WORK_MINUTES);
        self.timer.break_duration_minutes =
            clamp(self.timer.break_duration_minutes, &BREAK_MINUTES);
        self.goal.daily_goal_hours = clamp(self.goal.daily_goal_hours, &GOAL_HOURS);
        self.history.retention_days = self.history.retention_days.max(1);
        self
    }
}
