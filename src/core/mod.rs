//! Core abstractions for pomotrack.
//!
//! This module provides the clock and scheduling ports the session core is
//! written against, plus their standard implementations.

mod clock;
mod ticker;
mod traits;

pub use clock::{FixedClock, SystemClock};
pub use ticker::{IntervalTicker, ManualTicker};
pub use traits::{Clock, TickHandle, TickSource};
