//! pomotrack - a Pomodoro session tracker
//!
//! This crate provides the session state machine that drives a Pomodoro
//! countdown and the persisted daily history it reports into. A host (the
//! bundled CLI, or any UI) delivers ticks and commands and renders the events
//! the core emits.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomoError;
pub use features::focus::{Mode, SessionEvent, TimerSession};
pub use features::history::HistoryStore;
