//! Error types for feedlayout
//!
//! All errors use thiserror for structured error handling.
//! None of them are fatal: callers at the UI and page boundaries log
//! storage and messaging failures and carry on with the native layout.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("No receiver in tab {0}")]
    NoReceiver(u32),

    #[error("Unknown layout field: {0}")]
    InvalidField(String),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
