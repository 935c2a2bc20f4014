// ============================================================================
// STORAGE - Durable key/value persistence for the session record
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

/// String key/value store that survives reloads (localStorage on the web)
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for native targets and tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_storage::{LocalStorage, Storage};

    use super::SessionStorage;
    use crate::error::{ClientError, Result};

    /// `window.localStorage`, raw strings (the record is already JSON)
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserStorage;

    impl SessionStorage for BrowserStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            LocalStorage::raw()
                .get_item(key)
                .map_err(|_| ClientError::Storage("Error reading localStorage".to_string()))
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|_| ClientError::Storage("Error writing localStorage".to_string()))
        }

        fn remove(&self, key: &str) -> Result<()> {
            LocalStorage::delete(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));

        storage.remove("k").unwrap();
        assert!(!storage.contains("k"));
        // removing twice is fine
        storage.remove("k").unwrap();
    }
}
