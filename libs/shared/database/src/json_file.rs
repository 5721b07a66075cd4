use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::store::{validate_collection_name, CollectionStore};

/// One `<collection>.json` array per collection inside a data directory.
///
/// Writes land in a temporary sibling file that is renamed over the target,
/// so a crash mid-write leaves the previous contents readable. Appends are
/// read-modify-write and are serialized by `write_lock` within the process.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        info!("Opened JSON file store at {}", root.display());

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    fn read_file(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.collection_path(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Array(records) => Ok(records),
            other => Err(StoreError::Corrupted {
                collection: collection.to_string(),
                reason: format!("expected a JSON array, found {}", json_kind(&other)),
            }),
        }
    }

    fn write_file(&self, collection: &str, records: &[Value]) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp_path = self.root.join(format!(".{}.json.tmp", collection));

        let body = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp_path, body)?;
        fs::rename(&tmp_path, &path)?;

        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl CollectionStore for JsonFileStore {
    fn read(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        validate_collection_name(collection)?;
        self.read_file(collection)
    }

    #[instrument(skip(self, record), fields(root = %self.root.display()))]
    fn append(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut records = self.read_file(collection)?;
        records.push(record);
        self.write_file(collection, &records)
    }

    #[instrument(skip(self, records), fields(root = %self.root.display()))]
    fn replace(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.write_file(collection, &records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
