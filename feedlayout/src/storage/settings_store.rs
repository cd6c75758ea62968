//! Settings store bridge
//!
//! Loads and saves the whole [`LayoutSettings`] record under one fixed key.

use crate::config::STORAGE_KEY;
use crate::error::Result;
use crate::model::LayoutSettings;
use crate::storage::kv_store::KeyValueStore;
use std::sync::Arc;

pub struct SettingsStore<S: KeyValueStore> {
    backend: Arc<S>,
}

impl<S: KeyValueStore> Clone for SettingsStore<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Stored settings, or `None` when the caller should use defaults
    ///
    /// A record that no longer parses is treated like a missing one.
    pub async fn load(&self) -> Result<Option<LayoutSettings>> {
        let Some(value) = self.backend.get(STORAGE_KEY).await? else {
            tracing::debug!("No stored layout settings");
            return Ok(None);
        };

        match serde_json::from_value::<LayoutSettings>(value) {
            Ok(settings) => Ok(Some(settings.normalized())),
            Err(e) => {
                tracing::warn!("Discarding unreadable layout settings: {}", e);
                Ok(None)
            }
        }
    }

    /// Replace the stored record
    pub async fn save(&self, settings: &LayoutSettings) -> Result<()> {
        let value = serde_json::to_value(settings)?;
        self.backend.set(STORAGE_KEY, value).await?;
        tracing::debug!("Layout settings saved");
        Ok(())
    }
}
