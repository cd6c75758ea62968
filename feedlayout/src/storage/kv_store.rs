//! Key-value storage backends
//!
//! The extension persists through an asynchronous get/set service. Both
//! backends here replace a key's whole value on every write.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Asynchronous key-value service
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Volatile store, also used to stand in for the page's own storage
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    failing: Arc<AtomicBool>,
    read_only: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail, as a full quota would
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Keep reads working but fail every write
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Storage("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.check()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.check()?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(AppError::Storage("quota exceeded".to_string()));
        }
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by one JSON object file
///
/// Writes go to a temp file which is then renamed over the original, so a
/// reader sees either the old or the new object.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn read_object(&self) -> Result<Map<String, Value>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Storage(format!(
                "{:?} does not hold a JSON object",
                self.path
            ))),
        }
    }

    async fn write_object(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(map)?;
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.path).await?;
        tracing::debug!("Wrote {} bytes to {:?}", content.len(), self.path);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let map = self.read_object().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_object().await?;
        map.insert(key.to_string(), value);
        self.write_object(&map).await
    }
}
