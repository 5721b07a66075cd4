use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// Key-value style storage where each key names a collection of JSON records.
pub trait CollectionStore: Send + Sync {
    /// All records of a collection in insertion order. Unknown collections are empty.
    fn read(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    fn append(&self, collection: &str, record: Value) -> Result<(), StoreError>;

    fn replace(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError>;
}

/// Typed access on top of any [`CollectionStore`].
pub trait CollectionStoreExt: CollectionStore {
    fn load_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        self.read(collection)?
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|e| StoreError::Corrupted {
                    collection: collection.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    fn append_typed<T: Serialize>(&self, collection: &str, record: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        self.append(collection, value)
    }
}

impl<S: CollectionStore + ?Sized> CollectionStoreExt for S {}

pub fn validate_collection_name(collection: &str) -> Result<(), StoreError> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert!(validate_collection_name("appointments").is_ok());
        assert!(validate_collection_name("dentist-notes_2").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("../etc").is_err());
        assert!(validate_collection_name("Patients").is_err());
    }
}
