//! Pomodoro work/break sessions.
//!
//! - [`TimerSession`] runs the countdown and reports finished time
//! - [`SessionEvent`] tells a host what changed
//! - `progress` maps the day's minutes onto a ratio and colour
//! - `timer` holds input parsing and formatting helpers

pub mod events;
pub mod progress;
pub mod session;
pub mod timer;

pub use events::{SessionEvent, SessionListener};
pub use progress::{progress_color, progress_ratio, ProgressBand, Rgb};
pub use session::{Mode, TimerSession, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, TICK_INTERVAL};
pub use timer::{
    format_minutes, format_mmss, parse_in_range, render_progress_bar, BREAK_MINUTES, GOAL_HOURS,
    WORK_MINUTES,
};
