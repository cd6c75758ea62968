//! Page watcher
//!
//! Runs for the lifetime of the page script and keeps the layout applied
//! while the host re-renders. Structural mutations and finished client-side
//! navigations schedule a re-apply from storage; update messages from the
//! UI are applied straight away and stored for later passes.
//!
//! The watcher never stops after a successful apply. The host rebuilds its
//! grid on every navigation, so the next mutation has to be seen too.

use crate::model::LayoutSettings;
use crate::page::dom::PageDocument;
use crate::page::layout::{apply_layout, ApplyReport};
use crate::protocol::LayoutMessage;
use crate::storage::{KeyValueStore, SettingsStore};
use tokio::sync::mpsc;

/// Something that happened in the page context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A mutation batch added this many nodes somewhere under the body
    NodesAdded(usize),
    /// The host router dispatched [`crate::config::NAVIGATION_FINISHED_EVENT`]
    NavigationFinished,
    /// Raw message received from the extension UI
    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    /// A re-apply is due on the next flush
    Scheduled,
}

pub struct PageWatcher<D: PageDocument, S: KeyValueStore> {
    document: D,
    store: SettingsStore<S>,
    last_known: Option<LayoutSettings>,
    /// `last_known` came from a message whose save failed
    unsaved: bool,
    state: WatcherState,
}

impl<D: PageDocument, S: KeyValueStore> PageWatcher<D, S> {
    pub fn new(document: D, store: SettingsStore<S>) -> Self {
        Self {
            document,
            store,
            last_known: None,
            unsaved: false,
            state: WatcherState::Idle,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn last_known(&self) -> Option<LayoutSettings> {
        self.last_known
    }

    /// React to one event without applying storage-backed passes yet
    pub async fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::NodesAdded(0) => {}
            PageEvent::NodesAdded(_) | PageEvent::NavigationFinished => {
                self.state = WatcherState::Scheduled;
            }
            PageEvent::Message(payload) => match LayoutMessage::parse(&payload) {
                Ok(LayoutMessage::UpdateLayout { settings }) => {
                    self.apply_update(settings).await;
                }
                Ok(LayoutMessage::Unknown) => {
                    tracing::debug!("Ignoring unknown message type");
                }
                Err(e) => {
                    tracing::warn!("Dropping malformed message: {}", e);
                }
            },
        }
    }

    /// Run the scheduled re-apply, if any
    pub async fn flush(&mut self) -> Option<ApplyReport> {
        if self.state != WatcherState::Scheduled {
            return None;
        }
        self.state = WatcherState::Idle;
        self.check_and_apply().await
    }

    /// Apply the latest known settings to the current document
    ///
    /// Storage wins over the in-memory copy unless that copy holds a message
    /// that could not be saved yet. With neither, the page keeps its native
    /// layout.
    pub async fn check_and_apply(&mut self) -> Option<ApplyReport> {
        if self.unsaved {
            self.persist_last_known().await;
        }

        if !self.unsaved {
            match self.store.load().await {
                Ok(Some(settings)) => self.last_known = Some(settings),
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to read layout settings, using last known: {}", e),
            }
        }

        let settings = self.last_known?;
        let report = apply_layout(&mut self.document, &settings);
        tracing::debug!(
            "Applied layout to {} grid(s), {} section(s), fallback={}",
            report.grids,
            report.sections,
            report.used_fallback
        );
        Some(report)
    }

    async fn apply_update(&mut self, settings: LayoutSettings) {
        let settings = settings.normalized();
        let report = apply_layout(&mut self.document, &settings);
        self.last_known = Some(settings);
        tracing::info!(
            "Applied layout update to {} grid(s), {} section(s)",
            report.grids,
            report.sections
        );

        self.unsaved = true;
        self.persist_last_known().await;
    }

    async fn persist_last_known(&mut self) {
        let Some(settings) = self.last_known else {
            return;
        };
        match self.store.save(&settings).await {
            Ok(()) => self.unsaved = false,
            Err(e) => tracing::warn!("Failed to persist layout update: {}", e),
        }
    }

    /// Handle every queued event, then flush once
    pub async fn drain(&mut self, events: &mut mpsc::UnboundedReceiver<PageEvent>) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle(event).await;
            handled += 1;
        }
        self.flush().await;
        handled
    }

    /// Apply once, then follow `events` until every sender is gone
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) {
        self.check_and_apply().await;

        while let Some(event) = events.recv().await {
            self.handle(event).await;
            self.drain(&mut events).await;
        }
        tracing::debug!("Page event channel closed");
    }
}
