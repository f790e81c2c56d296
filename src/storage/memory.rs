//! In-memory history storage.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PomoError;

use super::HistoryStorage;

/// Keeps the history document in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a store and
/// inspect what was written through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    bytes: Rc<RefCell<Option<Vec<u8>>>>,
    writes: Rc<RefCell<usize>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `bytes`.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        *storage.bytes.borrow_mut() = Some(bytes.into());
        storage
    }

    /// Currently stored bytes.
    #[must_use]
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.borrow().clone()
    }

    /// Stored bytes as UTF-8 text.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.bytes()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Number of successful saves.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, PomoError> {
        Ok(self.bytes())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), PomoError> {
        *self.bytes.borrow_mut() = Some(bytes.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
