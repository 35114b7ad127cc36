use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};

use super::DocumentStore;

/// In-memory document store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.documents
            .lock()
            .map_err(|_| Error::internal("memory document store lock poisoned"))
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.get("decks").unwrap(), None);

        store.put("decks", "[]").unwrap();
        assert_eq!(store.get("decks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_put_replaces() {
        let store = MemoryDocumentStore::new();
        store.put("decks", "[]").unwrap();
        store.put("decks", "[1]").unwrap();
        assert_eq!(store.get("decks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let store = MemoryDocumentStore::new();
        store.put("decks", "[]").unwrap();

        assert!(store.delete("decks").unwrap());
        assert!(!store.delete("decks").unwrap());
        assert_eq!(store.get("decks").unwrap(), None);
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryDocumentStore::new();
        store.put("b", "2").unwrap();
        store.put("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }
}
