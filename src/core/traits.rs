//! Ports the session core depends on.
//!
//! The core never reads the wall clock or schedules callbacks on its own.
//! Hosts inject a [`Clock`] and a [`TickSource`] so that tests can drive the
//! timer with synthetic time.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

/// Source of the current local date and time.
pub trait Clock {
    /// Current local timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Opaque handle for a periodic tick registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub(crate) u64);

impl TickHandle {
    /// Numeric id of this registration.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A periodic scheduler.
///
/// `register` asks the host to start delivering ticks at `interval`; the host
/// then calls [`TimerSession::tick`](crate::features::focus::TimerSession::tick)
/// each time the registration fires. `cancel` stops further deliveries.
pub trait TickSource {
    /// Start a periodic registration.
    fn register(&mut self, interval: Duration) -> TickHandle;

    /// Stop a registration. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}
