//! Feature modules for pomotrack.
//!
//! - `focus` - the work/break session state machine
//! - `history` - persisted daily records and goal progress
//! - `shell` - completion scripts

pub mod focus;
pub mod history;
pub mod shell;
