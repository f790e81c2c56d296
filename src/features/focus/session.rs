//! The Pomodoro session state machine.
//!
//! A [`TimerSession`] owns one countdown that alternates between work and
//! break. It does not keep time itself: `start` asks the injected
//! [`TickSource`] for a 1-second registration and the host calls
//! [`TimerSession::tick`] whenever that registration fires. Completed and
//! interrupted sessions are reported to the [`HistoryStore`] it owns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::events::{SessionEvent, SessionListener};
use super::progress::{progress_color, progress_ratio, Rgb};
use super::timer::{parse_in_range, BREAK_MINUTES, GOAL_HOURS, WORK_MINUTES};
use crate::config::TimerConfig;
use crate::core::{TickHandle, TickSource};
use crate::features::history::HistoryStore;

/// Interval the session asks its tick source for.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default work session length in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 25;

/// Default break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// What the current countdown is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Work,
    Break,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Parse `work`/`break` (case-insensitive, with short forms).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" | "focus" => Some(Self::Work),
            "break" | "b" | "rest" => Some(Self::Break),
            _ => None,
        }
    }

    /// Label as shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Break => "BREAK",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Countdown state for alternating work and break sessions.
pub struct TimerSession {
    mode: Mode,
    remaining_seconds: u32,
    work_duration_minutes: u32,
    break_duration_minutes: u32,
    is_running: bool,
    elapsed_seconds: u32,
    /// The countdown hit zero and its minutes were already reported.
    completion_reported: bool,
    tick_handle: Option<TickHandle>,
    ticker: Box<dyn TickSource>,
    history: HistoryStore,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl TimerSession {
    /// A stopped work session with default durations.
    pub fn new(history: HistoryStore, ticker: impl TickSource + 'static) -> Self {
        Self {
            mode: Mode::Work,
            remaining_seconds: DEFAULT_WORK_MINUTES * 60,
            work_duration_minutes: DEFAULT_WORK_MINUTES,
            break_duration_minutes: DEFAULT_BREAK_MINUTES,
            is_running: false,
            elapsed_seconds: 0,
            completion_reported: false,
            tick_handle: None,
            ticker: Box::new(ticker),
            history,
            listeners: Vec::new(),
        }
    }

    /// A stopped work session with durations from `config`.
    ///
    /// Out-of-range durations fall back to the defaults.
    pub fn with_config(
        config: &TimerConfig,
        history: HistoryStore,
        ticker: impl TickSource + 'static,
    ) -> Self {
        let mut session = Self::new(history, ticker);
        if WORK_MINUTES.contains(&config.work_duration_minutes) {
            session.work_duration_minutes = config.work_duration_minutes;
        }
        if BREAK_MINUTES.contains(&config.break_duration_minutes) {
            session.break_duration_minutes = config.break_duration_minutes;
        }
        session.remaining_seconds = session.work_duration_minutes * 60;
        session
    }

    /// Register a listener for session events.
    pub fn subscribe(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub const fn work_duration_minutes(&self) -> u32 {
        self.work_duration_minutes
    }

    #[must_use]
    pub const fn break_duration_minutes(&self) -> u32 {
        self.break_duration_minutes
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Seconds counted down since the last start or switch.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// The live tick registration, if running.
    #[must_use]
    pub const fn tick_handle(&self) -> Option<TickHandle> {
        self.tick_handle
    }

    /// Configured length of `mode`, in minutes.
    #[must_use]
    pub const fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_duration_minutes,
            Mode::Break => self.break_duration_minutes,
        }
    }

    /// The history this session reports into.
    #[must_use]
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Minutes completed toward today's goal.
    #[must_use]
    pub fn progress_minutes(&self) -> u32 {
        self.history.get_current_progress()
    }

    /// Today's goal, in minutes.
    #[must_use]
    pub const fn daily_goal_minutes(&self) -> u32 {
        self.history.daily_goal_minutes()
    }

    /// Completion ratio toward today's goal, capped at 1.0.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        progress_ratio(self.progress_minutes(), self.daily_goal_minutes())
    }

    /// Colour for the progress bar.
    #[must_use]
    pub fn progress_color(&self) -> Rgb {
        progress_color(self.progress_ratio())
    }

    /// Start counting down. Does nothing if already running.
    ///
    /// A finished countdown is reloaded to the full duration first.
    pub fn start(&mut self) {
        if self.is_running {
            return;
        }

        if self.remaining_seconds == 0 {
            self.load_duration();
        }

        self.is_running = true;
        self.elapsed_seconds = 0;
        self.tick_handle = Some(self.ticker.register(TICK_INTERVAL));
        log::debug!("{} session started with {}s left", self.mode, self.remaining_seconds);
        self.emit(SessionEvent::RunningChanged { is_running: true });
    }

    /// Stop counting down. Does nothing if not running.
    pub fn stop(&mut self) {
        if !self.is_running {
            return;
        }

        self.is_running = false;
        if let Some(handle) = self.tick_handle.take() {
            self.ticker.cancel(handle);
        }
        self.emit(SessionEvent::RunningChanged { is_running: false });
    }

    /// Stop and rewind to the full duration of the current mode.
    pub fn reset(&mut self) {
        self.stop();
        self.load_duration();
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored while stopped. Reaching zero completes the session.
    pub fn tick(&mut self) {
        if !self.is_running {
            return;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            self.elapsed_seconds += 1;
            self.emit(SessionEvent::TimeChanged {
                remaining_seconds: self.remaining_seconds,
            });
        }

        if self.remaining_seconds == 0 {
            self.complete();
        }
    }

    /// Flip between work and break.
    ///
    /// Whole minutes counted since the last start are logged under the mode
    /// being left. Leaving an unfinished work session also credits the
    /// minutes it got through to today's progress.
    pub fn switch_mode(&mut self) {
        let leaving = self.mode;

        let partial_minutes = self.elapsed_seconds / 60;
        if partial_minutes > 0 {
            self.history.record_session(leaving, partial_minutes);
        }

        self.stop();

        if leaving == Mode::Work && !self.completion_reported {
            let completed = self
                .work_duration_minutes
                .saturating_sub(self.remaining_seconds / 60);
            if completed > 0 {
                self.add_progress(completed);
            }
        }

        self.mode = leaving.toggled();
        self.elapsed_seconds = 0;
        log::info!("switched from {leaving} to {}", self.mode);
        self.emit(SessionEvent::ModeChanged { mode: self.mode });
        self.load_duration();
    }

    /// Set the work length from user text (1-120 minutes).
    ///
    /// Invalid text leaves everything unchanged.
    pub fn set_work_duration(&mut self, text: &str) {
        if let Some(minutes) = parse_in_range(text, &WORK_MINUTES) {
            self.work_duration_minutes = minutes;
            self.duration_changed(Mode::Work, minutes);
        }
    }

    /// Set the break length from user text (1-30 minutes).
    ///
    /// Invalid text leaves everything unchanged.
    pub fn set_break_duration(&mut self, text: &str) {
        if let Some(minutes) = parse_in_range(text, &BREAK_MINUTES) {
            self.break_duration_minutes = minutes;
            self.duration_changed(Mode::Break, minutes);
        }
    }

    /// Set the daily goal from user text (1-24 hours).
    ///
    /// Invalid text leaves everything unchanged.
    pub fn set_daily_goal(&mut self, text: &str) {
        if let Some(hours) = parse_in_range(text, &GOAL_HOURS) {
            if self.history.set_daily_goal_hours(hours) {
                self.emit(SessionEvent::GoalChanged {
                    goal_minutes: self.history.daily_goal_minutes(),
                });
            }
        }
    }

    /// Zero today's progress.
    pub fn reset_daily_progress(&mut self) {
        let previous = self.history.get_current_progress();
        self.history.reset_progress();
        self.emit(SessionEvent::ProgressUpdated {
            previous_minutes: previous,
            minutes_completed: 0,
            goal_minutes: self.history.daily_goal_minutes(),
        });
    }

    fn duration_changed(&mut self, mode: Mode, minutes: u32) {
        self.emit(SessionEvent::DurationChanged { mode, minutes });
        if self.mode == mode {
            self.load_duration();
        }
    }

    /// Load the full duration of the current mode into the countdown.
    fn load_duration(&mut self) {
        self.remaining_seconds = self.duration_for(self.mode) * 60;
        self.completion_reported = false;
        self.emit(SessionEvent::TimeChanged {
            remaining_seconds: self.remaining_seconds,
        });
    }

    fn complete(&mut self) {
        let mode = self.mode;
        self.stop();
        self.completion_reported = true;
        self.elapsed_seconds = 0;
        log::info!("{mode} session complete");
        self.emit(SessionEvent::SessionComplete { mode });

        match mode {
            Mode::Work => {
                self.history
                    .record_session(Mode::Work, self.work_duration_minutes);
                self.add_progress(self.work_duration_minutes);
            }
            Mode::Break => {
                self.history
                    .record_session(Mode::Break, self.break_duration_minutes);
            }
        }
    }

    fn add_progress(&mut self, minutes: u32) {
        let (previous, updated) = self.history.add_progress(minutes);
        self.emit(SessionEvent::ProgressUpdated {
            previous_minutes: previous,
            minutes_completed: updated,
            goal_minutes: self.history.daily_goal_minutes(),
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}
