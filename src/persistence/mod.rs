//! Key/value persistence seam
//!
//! High scores and settings are stored as small strings under fixed keys.
//! Every failure (storage missing, quota exceeded, private browsing) is
//! absorbed here and reported as `None`/`false`.

use std::collections::HashMap;

/// Minimal LocalStorage-shaped store
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    /// Returns false if the write was rejected
    fn set_item(&mut self, key: &str, value: &str) -> bool;
}

/// In-process storage (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        match Self::local_storage() {
            Some(storage) => storage.set_item(key, value).is_ok(),
            None => {
                log::warn!("LocalStorage unavailable, '{}' not saved", key);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), None);
        assert!(storage.set_item("k", "1"));
        assert!(storage.set_item("k", "2"));
        assert_eq!(storage.get_item("k").as_deref(), Some("2"));
    }
}
