//! In-memory store for tests.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::traits::ContactStore;
use super::types::ContactMap;
use crate::error::{ContactsError, Result};

#[derive(Debug, Default)]
struct MemoryState {
    // Kept serialized so loads go through the same validation as files.
    json: Option<String>,
    saves: usize,
    simulate_write_error: bool,
}

/// In-memory store.
///
/// Clones share state, so a test can keep a handle while the address book
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw JSON contents.
    pub fn with_json(json: impl Into<String>) -> Self {
        let store = Self::default();
        store.state.borrow_mut().json = Some(json.into());
        store
    }

    pub fn json(&self) -> Option<String> {
        self.state.borrow().json.clone()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.state.borrow().saves
    }

    /// Make subsequent saves fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.state.borrow_mut().simulate_write_error = simulate;
    }
}

impl ContactStore for MemoryStore {
    fn location(&self) -> &Path {
        Path::new(":memory:")
    }

    fn load(&self) -> Result<Option<ContactMap>> {
        match &self.state.borrow().json {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| ContactsError::load(self.location(), e)),
            None => Ok(None),
        }
    }

    fn save(&mut self, contacts: &ContactMap) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.simulate_write_error {
            return Err(ContactsError::write(
                Path::new(":memory:"),
                "simulated write error",
            ));
        }
        state.json = Some(
            serde_json::to_string_pretty(contacts)
                .map_err(|e| ContactsError::write(Path::new(":memory:"), e))?,
        );
        state.saves += 1;
        Ok(())
    }
}
