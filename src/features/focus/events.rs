//! Notifications emitted by a [`TimerSession`](super::TimerSession).
//!
//! Each observable change is reported once, right after the operation that
//! caused it. Hosts redraw from these instead of polling.

use serde::Serialize;

use super::progress::progress_ratio;
use super::session::Mode;

/// Something about the session changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The countdown moved.
    TimeChanged { remaining_seconds: u32 },
    /// The timer started or stopped.
    RunningChanged { is_running: bool },
    /// The session flipped between work and break.
    ModeChanged { mode: Mode },
    /// A duration setting was accepted.
    DurationChanged { mode: Mode, minutes: u32 },
    /// The countdown reached zero.
    SessionComplete { mode: Mode },
    /// Today's progress toward the goal moved.
    ProgressUpdated {
        previous_minutes: u32,
        minutes_completed: u32,
        goal_minutes: u32,
    },
    /// The daily goal changed.
    GoalChanged { goal_minutes: u32 },
}

impl SessionEvent {
    /// For `ProgressUpdated`, the (old, new) completion percentages.
    #[must_use]
    pub fn progress_percent(&self) -> Option<(f64, f64)> {
        match *self {
            Self::ProgressUpdated {
                previous_minutes,
                minutes_completed,
                goal_minutes,
            } => Some((
                progress_ratio(previous_minutes, goal_minutes) * 100.0,
                progress_ratio(minutes_completed, goal_minutes) * 100.0,
            )),
            _ => None,
        }
    }
}

/// Receives session events.
pub trait SessionListener {
    /// Called once per observable change.
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionListener for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let event = SessionEvent::ProgressUpdated {
            previous_minutes: 0,
            minutes_completed: 60,
            goal_minutes: 240,
        };
        let (from, to) = event.progress_percent().unwrap();
        assert!(from.abs() < f64::EPSILON);
        assert!((to - 25.0).abs() < 1e-9);

        assert!(SessionEvent::ModeChanged { mode: Mode::Work }
            .progress_percent()
            .is_none());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SessionEvent::SessionComplete { mode: Mode::Break })
            .unwrap();
        assert_eq!(json, r#"{"event":"session_complete","mode":"BREAK"}"#);
    }
}
