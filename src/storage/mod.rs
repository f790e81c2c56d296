//! Storage layer for pomotrack.
//!
//! History is kept as a single JSON document. The store above this layer only
//! sees opaque bytes through [`HistoryStorage`]:
//! - [`FileStorage`] writes `~/.pomotrack/history.json` atomically
//! - [`MemoryStorage`] keeps the bytes in memory for tests and dry runs

mod atomic;
mod file;
mod memory;

pub use atomic::atomic_write;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::PomoError;

/// Byte-level persistence port for the history document.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStorage {
    /// Read the stored document.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend exists but cannot be read.
    fn load(&self) -> Result<Option<Vec<u8>>, PomoError>;

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. A failed write must leave the
    /// previous document readable.
    fn save(&self, bytes: &[u8]) -> Result<(), PomoError>;
}
