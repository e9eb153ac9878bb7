//! Whole-record JSON persistence.
//!
//! Each record lives in one file and is always read and written in full.
//! Writes go through a temp file in the same directory and are renamed into
//! place; a sidecar `.lock` file serializes read-modify-write cycles between
//! processes. A record that fails to parse is treated as empty.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::ProgressError;

/// A JSON file holding one record of type `T`
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Get the record file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn acquire_lock(&self) -> Result<File, ProgressError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;
        Ok(lock)
    }

    /// Read the record; missing or malformed files yield the default
    pub fn load(&self) -> Result<T, ProgressError> {
        if !self.path.exists() {
            return Ok(T::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding malformed record");
                Ok(T::default())
            }
        }
    }

    /// Replace the record on disk
    pub fn save(&self, record: &T) -> Result<(), ProgressError> {
        let _lock = self.acquire_lock()?;
        self.write_atomic(record)
    }

    fn write_atomic(&self, record: &T) -> Result<(), ProgressError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp);
            serde_json::to_writer_pretty(&mut writer, record)?;
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| ProgressError::Io(e.error))?;

        debug!(path = %self.path.display(), "Record saved");
        Ok(())
    }

    /// Load, mutate and save under the lock; returns the closure's result
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> Result<R, ProgressError> {
        let _lock = self.acquire_lock()?;
        let mut record = self.load()?;
        let result = mutate(&mut record);
        self.write_atomic(&record)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Counter = BTreeMap<String, u32>;

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let store: JsonStore<Counter> = JsonStore::new(temp.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store: JsonStore<Counter> = JsonStore::new(temp.path().join("nested/counter.json"));

        let mut counter = Counter::new();
        counter.insert("visits".to_string(), 3);
        store.save(&counter).unwrap();

        assert_eq!(store.load().unwrap(), counter);
    }

    #[test]
    fn test_malformed_file_degrades_to_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counter.json");
        std::fs::write(&path, "{\"visits\": ").unwrap();

        let store: JsonStore<Counter> = JsonStore::new(&path);
        assert!(store.load().unwrap().is_empty());

        // The next write replaces the corrupt file
        store.update(|c| c.insert("visits".to_string(), 1)).unwrap();
        assert_eq!(store.load().unwrap().get("visits"), Some(&1));
    }

    #[test]
    fn test_lock_path_is_sidecar() {
        let store: JsonStore<Counter> = JsonStore::new("/tmp/fekb/notes.json");
        assert_eq!(store.lock_path(), PathBuf::from("/tmp/fekb/notes.json.lock"));
    }
}
