//! Application state and initialization
//!
//! Wires the command-line surface: a file-backed settings store under the
//! data directory and a controller with no browser attached.

use crate::config::{APP_DIR_NAME, SETTINGS_FILE_NAME};
use crate::error::{AppError, Result};
use crate::services::{DetachedMessenger, SettingsController, UpdateBroadcaster};
use crate::storage::{JsonFileStore, SettingsStore};
use std::path::PathBuf;

pub type CliController = SettingsController<JsonFileStore, DetachedMessenger>;

/// Central application state
pub struct AppState {
    pub data_dir: PathBuf,
    pub controller: CliController,
}

/// Platform data directory joined with the application name
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Generic("Failed to locate a data directory".to_string()))
}

/// Application setup - called once on startup
pub async fn setup(data_dir: PathBuf) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Data directory: {:?}", data_dir);

    tokio::fs::create_dir_all(&data_dir).await?;

    let store = SettingsStore::new(JsonFileStore::new(data_dir.join(SETTINGS_FILE_NAME)));
    let mut controller = SettingsController::new(store, UpdateBroadcaster::new(DetachedMessenger));
    controller.mount().await;

    tracing::info!("Application initialized successfully");

    Ok(AppState {
        data_dir,
        controller,
    })
}
