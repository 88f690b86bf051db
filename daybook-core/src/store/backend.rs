//! Blob backends: opaque string storage addressed by key.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DaybookError, DaybookResult};

/// A key-value store of strings. The event store keeps its whole mapping
/// under a single key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// The value stored under `key`, or `None` if nothing was ever stored.
    async fn get_string(&self, key: &str) -> DaybookResult<Option<String>>;

    async fn set_string(&self, key: &str, value: &str) -> DaybookResult<()>;
}

/// Stores each key as a JSON file in one directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBlobStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` are dropped,
    /// so `@eventsByDate` lives in `eventsByDate.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let stem: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let stem = if stem.is_empty() { "blob".to_string() } else { stem };

        self.dir.join(format!("{stem}.json"))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get_string(&self, key: &str) -> DaybookResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> DaybookResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let temp = path.with_extension("json.tmp");

        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }
}

/// In-process backend. Can be told to fail, to exercise the degraded paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Current value under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn entries(&self) -> DaybookResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| DaybookError::Storage("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get_string(&self, key: &str) -> DaybookResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DaybookError::Storage("read refused".into()));
        }
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> DaybookResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DaybookError::Storage("write refused".into()));
        }
        self.entries()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
