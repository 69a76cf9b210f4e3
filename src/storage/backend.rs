use crate::core::traits::StorageBackend;
use crate::utils::error::{AppError, AppResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Map a file inside the data directory back to its key
    pub fn key_for(path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }
        name.strip_suffix(".json").map(str::to_string)
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Io(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        // Write to a hidden sibling first so readers never see a torn file
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            AppError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

/// In-memory backend; clones share the same underlying map
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent reads fail, as a denied storage access would
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail, as an exceeded quota would
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage access denied".to_string()));
        }
        let items = self
            .items
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage quota exceeded".to_string()));
        }
        let mut items = self
            .items
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
