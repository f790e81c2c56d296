//! Configuration management for pomotrack.
//!
//! This module handles loading and saving configuration from `~/.pomotrack/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GoalConfig, HistoryConfig, TimerConfig};
