//! Tick source implementations.
//!
//! [`ManualTicker`] only records registrations; the caller decides when a
//! tick happens. [`IntervalTicker`] runs one tokio interval task per
//! registration and forwards each tick over a channel to the task that owns
//! the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::traits::{TickHandle, TickSource};

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    active: Vec<(TickHandle, Duration)>,
    registered: usize,
    cancelled: usize,
}

/// A tick source for tests and single-stepping hosts.
///
/// Clones share state, so a test can inspect registrations after handing a
/// clone to a session.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    state: Rc<RefCell<ManualState>>,
}

impl ManualTicker {
    /// Create a ticker with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations currently live.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Whether `handle` is still registered.
    #[must_use]
    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.state.borrow().active.iter().any(|(h, _)| *h == handle)
    }

    /// Interval of the live registration, if exactly one exists.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        match self.state.borrow().active.as_slice() {
            [(_, interval)] => Some(*interval),
            _ => None,
        }
    }

    /// Total number of `register` calls seen.
    #[must_use]
    pub fn registrations(&self) -> usize {
        self.state.borrow().registered
    }

    /// Total number of effective `cancel` calls seen.
    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.state.borrow().cancelled
    }
}

impl TickSource for ManualTicker {
    fn register(&mut self, interval: Duration) -> TickHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let handle = TickHandle(state.next_id);
        state.active.push((handle, interval));
        state.registered += 1;
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut state = self.state.borrow_mut();
        let before = state.active.len();
        state.active.retain(|(h, _)| *h != handle);
        if state.active.len() != before {
            state.cancelled += 1;
        }
    }
}

/// A wall-clock tick source backed by tokio interval tasks.
///
/// Each registration is a spawned task ticking on fixed deadlines; late
/// ticks are delivered in a burst so the count keeps up with wall time.
pub struct IntervalTicker {
    next_id: u64,
    runtime: Handle,
    sender: UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl IntervalTicker {
    /// Create a ticker spawning onto `runtime`, and the receiving end its
    /// ticks arrive on.
    #[must_use]
    pub fn new(runtime: Handle) -> (Self, UnboundedReceiver<TickHandle>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Self {
            next_id: 0,
            runtime,
            sender,
            tasks: HashMap::new(),
        };
        (ticker, receiver)
    }
}

impl TickSource for IntervalTicker {
    fn register(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let sender = self.sender.clone();

        let task = self.runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if sender.send(handle).is_err() {
                    break;
                }
            }
        });

        log::debug!("registered tick {} every {:?}", handle.id(), period);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            log::debug!("cancelled tick {}", handle.id());
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
