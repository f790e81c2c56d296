use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomotrack")]
#[command(about = "A Pomodoro timer that keeps a daily history of focused work")]
#[command(long_about = "pomotrack - a Pomodoro session tracker

Runs work and break countdowns in the terminal and keeps a per-day
history of the minutes spent, plus progress toward a daily work goal.

QUICK START:
  pomotrack start               Run a 25-minute work session
  pomotrack start --mode break  Run a break
  pomotrack status              Today's progress toward the goal
  pomotrack history --days 14   Minutes per day for the last two weeks
  pomotrack log work 25         Record a session done away from the timer

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.pomotrack (override with --home or POMOTRACK_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding config.yaml and history.json
    #[arg(long, env = "POMOTRACK_HOME", global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one session in the foreground
    ///
    /// Counts down a work session (or a break with --mode break) and
    /// records it when the countdown reaches zero. Durations default to
    /// the values in config.yaml.
    ///
    /// # Examples
    ///
    ///   pomotrack start                 25-minute work session
    ///   pomotrack start --work 50       50-minute work session
    ///   pomotrack start --mode break    Break with the configured length
    ///   pomotrack start -o json         Stream events as JSON lines
    #[command(alias = "s")]
    Start {
        /// Session to run (work, break)
        #[arg(long, short = 'm', default_value = "work")]
        mode: String,

        /// Work length in minutes (1-120)
        #[arg(long, short = 'w')]
        work: Option<String>,

        /// Break length in minutes (1-30)
        #[arg(long = "break", short = 'b')]
        break_minutes: Option<String>,
    },

    /// Show today's progress toward the daily goal
    ///
    /// # Examples
    ///
    ///   pomotrack status
    ///   pomotrack status -o json
    #[command(alias = "st")]
    Status,

    /// Show minutes per day
    ///
    /// Lists the last N days, today first, including days with nothing
    /// logged, followed by a short summary and the current streak.
    ///
    /// # Examples
    ///
    ///   pomotrack history
    ///   pomotrack history --days 30
    #[command(alias = "h")]
    History {
        /// Number of days to show
        #[arg(long, short = 'd', default_value = "7")]
        days: u32,
    },

    /// Show lifetime work and break totals
    Stats,

    /// Record a session that was not timed here
    ///
    /// Work minutes also count toward today's goal.
    ///
    /// # Examples
    ///
    ///   pomotrack log work 25
    ///   pomotrack log break 5
    Log {
        /// Session kind (work, break)
        mode: String,

        /// Minutes to record
        minutes: u32,
    },

    /// Set the daily work goal
    ///
    /// # Examples
    ///
    ///   pomotrack goal 6
    Goal {
        /// Goal in hours (1-24)
        hours: String,
    },

    /// Zero today's progress toward the goal
    ///
    /// History records and lifetime totals are kept.
    ResetProgress,

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell.
    ///
    /// Example: pomotrack completions bash > ~/.bash_completion.d/pomotrack
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}
