use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use tracing::instrument;

use crate::{traits::KeyValueStore, Status};

/// Stores every key as `<key>.json` under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, Status> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Status::invalid_argument(format!(
                "invalid storage key '{key}'"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(name = "file_store::get", level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, Status> {
        match fs::read_to_string(self.path(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(name = "file_store::set", level = "trace", skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), Status> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Readers never observe a partially written document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process store. Writes can be switched to fail to mimic a full disk or
/// an exceeded quota.
#[derive(Default, Debug)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    failing_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = MemoryStore::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
        store
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Status> {
        let values = self
            .values
            .lock()
            .map_err(|_| Status::internal("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Status> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(Status::unavailable(format!(
                "storage quota exceeded writing '{key}'"
            )));
        }

        let mut values = self
            .values
            .lock()
            .map_err(|_| Status::internal("memory store lock poisoned"))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
