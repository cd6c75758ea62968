//! Update broadcaster
//!
//! Pushes the current settings from the UI to the page script of the active
//! tab. Tabs without a page script (other sites, or pages still loading) are
//! skipped quietly.

use crate::error::{AppError, Result};
use crate::model::LayoutSettings;
use crate::page::watcher::PageEvent;
use crate::protocol::LayoutMessage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cross-context messaging service
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Foreground tab of the current window, if any
    async fn active_tab(&self) -> Option<TabId>;

    /// Deliver a serialized message to the page script of `tab`
    ///
    /// Fails with [`AppError::NoReceiver`] when the tab runs no page script.
    async fn send(&self, tab: TabId, payload: String) -> Result<()>;
}

struct Tab {
    url: String,
    page: Option<mpsc::UnboundedSender<PageEvent>>,
}

#[derive(Default)]
struct TabRegistry {
    tabs: HashMap<TabId, Tab>,
    active: Option<TabId>,
    next_id: u32,
}

/// In-process messenger connecting the UI to page watchers over channels
#[derive(Clone, Default)]
pub struct ChannelMessenger {
    registry: Arc<Mutex<TabRegistry>>,
}

impl ChannelMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab and bring it to the foreground
    pub async fn open_tab(&self, url: impl Into<String>) -> TabId {
        let mut registry = self.registry.lock().await;
        registry.next_id += 1;
        let id = TabId(registry.next_id);
        registry.tabs.insert(
            id,
            Tab {
                url: url.into(),
                page: None,
            },
        );
        registry.active = Some(id);
        id
    }

    /// Register the page script running in `tab`
    pub async fn attach_page(&self, tab: TabId, events: mpsc::UnboundedSender<PageEvent>) -> Result<()> {
        let mut registry = self.registry.lock().await;
        let entry = registry
            .tabs
            .get_mut(&tab)
            .ok_or_else(|| AppError::Messaging(format!("No tab {}", tab)))?;
        tracing::debug!("Page script attached in tab {} ({})", tab, entry.url);
        entry.page = Some(events);
        Ok(())
    }

    pub async fn activate(&self, tab: TabId) -> Result<()> {
        let mut registry = self.registry.lock().await;
        if !registry.tabs.contains_key(&tab) {
            return Err(AppError::Messaging(format!("No tab {}", tab)));
        }
        registry.active = Some(tab);
        Ok(())
    }

    pub async fn close_tab(&self, tab: TabId) {
        let mut registry = self.registry.lock().await;
        registry.tabs.remove(&tab);
        if registry.active == Some(tab) {
            registry.active = None;
        }
    }
}

#[async_trait]
impl TabMessenger for ChannelMessenger {
    async fn active_tab(&self) -> Option<TabId> {
        self.registry.lock().await.active
    }

    async fn send(&self, tab: TabId, payload: String) -> Result<()> {
        let registry = self.registry.lock().await;
        let entry = registry
            .tabs
            .get(&tab)
            .ok_or_else(|| AppError::Messaging(format!("No tab {}", tab)))?;
        let page = entry.page.as_ref().ok_or(AppError::NoReceiver(tab.0))?;
        page.send(PageEvent::Message(payload))
            .map_err(|_| AppError::NoReceiver(tab.0))
    }
}

/// Messenger for surfaces with no browser attached, e.g. the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedMessenger;

#[async_trait]
impl TabMessenger for DetachedMessenger {
    async fn active_tab(&self) -> Option<TabId> {
        None
    }

    async fn send(&self, tab: TabId, _payload: String) -> Result<()> {
        Err(AppError::NoReceiver(tab.0))
    }
}

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered(TabId),
    /// No active tab, or it runs no page script
    Skipped,
}

pub struct UpdateBroadcaster<M: TabMessenger> {
    messenger: Arc<M>,
}

impl<M: TabMessenger> Clone for UpdateBroadcaster<M> {
    fn clone(&self) -> Self {
        Self {
            messenger: Arc::clone(&self.messenger),
        }
    }
}

impl<M: TabMessenger> UpdateBroadcaster<M> {
    pub fn new(messenger: M) -> Self {
        Self {
            messenger: Arc::new(messenger),
        }
    }

    /// Send `settings` to the active tab only
    pub async fn broadcast(&self, settings: &LayoutSettings) -> Result<Delivery> {
        let Some(tab) = self.messenger.active_tab().await else {
            tracing::debug!("No active tab, skipping layout broadcast");
            return Ok(Delivery::Skipped);
        };

        let payload = LayoutMessage::update(*settings).to_json()?;
        match self.messenger.send(tab, payload).await {
            Ok(()) => {
                tracing::debug!("Layout update sent to tab {}", tab);
                Ok(Delivery::Delivered(tab))
            }
            Err(AppError::NoReceiver(_)) => {
                tracing::debug!("Tab {} has no page script, skipping layout broadcast", tab);
                Ok(Delivery::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}
