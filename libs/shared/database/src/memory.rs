use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{validate_collection_name, CollectionStore};

/// Process-local store. Everything is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for MemoryStore {
    fn read(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        validate_collection_name(collection)?;
        let collections = self.collections.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn append(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        let mut collections = self.collections.lock().map_err(|_| StoreError::LockPoisoned)?;
        let records = collections.entry(collection.to_string()).or_default();
        records.push(record);
        debug!("Appended record to in-memory collection {} ({} total)", collection, records.len());
        Ok(())
    }

    fn replace(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        let mut collections = self.collections.lock().map_err(|_| StoreError::LockPoisoned)?;
        collections.insert(collection.to_string(), records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CollectionStoreExt;
    use serde_json::json;

    #[test]
    fn test_unknown_collection_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.read("appointments").unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.append("notes", json!({"n": 1})).unwrap();
        store.append("notes", json!({"n": 2})).unwrap();
        store.append("other", json!({"n": 3})).unwrap();

        let notes = store.read("notes").unwrap();
        assert_eq!(notes, vec![json!({"n": 1}), json!({"n": 2})]);
    }

    #[test]
    fn test_typed_load_reports_corruption() {
        let store = MemoryStore::new();
        store.append("numbers", json!("not a number")).unwrap();

        let result: Result<Vec<u32>, _> = store.load_all("numbers");
        assert!(matches!(result, Err(StoreError::Corrupted { .. })));
    }
}
