//! feedlayout library
//!
//! Core of the feed layout extension: the settings model, the page-side
//! applier and watcher, and the UI-side controller with its storage and
//! messaging bridges. Exposed as a library for testing and for the
//! command-line front end.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod page;
pub mod protocol;
pub mod services;
pub mod storage;
