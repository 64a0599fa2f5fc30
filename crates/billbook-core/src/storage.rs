//! Persistence gateway contract.

use std::{cell::RefCell, collections::HashMap};

use crate::CoreResult;

/// Key under which the whole ledger blob is stored.
pub const DEFAULT_STORAGE_KEY: &str = "peopleData";

/// A local key-value store holding serialized documents.
pub trait KeyValueStore {
    /// Returns `None` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> CoreResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> CoreResult<()>;
    /// Wipes every key.
    fn clear(&self) -> CoreResult<()>;
}

/// In-process store, mostly useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        (**self).save(key, value)
    }

    fn clear(&self) -> CoreResult<()> {
        (**self).clear()
    }
}
