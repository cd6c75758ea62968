//! Page-script context
//!
//! Everything that runs inside the host page: the document surface, the
//! layout applier and the watcher that keeps re-applying it.

pub mod dom;
pub mod layout;
pub mod watcher;

pub use dom::{Display, ElementRole, MemoryDocument, NodeId, PageDocument};
pub use layout::{apply_layout, apply_site_default, ApplyReport, GridStyle};
pub use watcher::{PageEvent, PageWatcher, WatcherState};
