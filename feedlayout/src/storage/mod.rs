//! Storage module
//!
//! Provides the key-value backends and the settings record bridge on top.

pub mod kv_store;
pub mod settings_store;

pub use kv_store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use settings_store::SettingsStore;
