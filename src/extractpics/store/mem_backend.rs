use super::backend::StorageBackend;
use crate::error::{Result, RetentionError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets `StorageBackend` take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_unavailable: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set` fail, as a full quota would.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make every call fail, as disabled storage (private browsing) would.
    pub fn set_simulate_unavailable(&self, simulate: bool) {
        self.simulate_unavailable.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Test helper: the raw stored string, bypassing the failure switches.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Test helper: plant a raw value without counting it as a write.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_unavailable.get() {
            return Err(RetentionError::Storage("Simulated unavailable storage".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_unavailable.get() {
            return Err(RetentionError::Storage("Simulated unavailable storage".to_string()));
        }
        if self.simulate_write_error.get() {
            return Err(RetentionError::Storage("Simulated quota exceeded".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
