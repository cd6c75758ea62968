//! Settings form controller
//!
//! Owns the settings edited in the extension UI. Each handler updates the
//! in-memory record first, then saves it and pushes it to the active page,
//! even when the value did not change. Only rejected input emits nothing.
//! Save and broadcast run side by side and neither waits for the other.

use crate::model::{
    apply_combine_margins_toggle, apply_hide_shorts, apply_in_subscriptions, checked_field_update,
    checked_slider_value, default_settings, LayoutField, LayoutSettings, ResetProfile, RESET_PROFILE,
};
use crate::services::broadcast::{TabMessenger, UpdateBroadcaster};
use crate::storage::{KeyValueStore, SettingsStore};

/// Popup colour scheme. Purely cosmetic, never stored or broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub struct SettingsController<S: KeyValueStore, M: TabMessenger> {
    settings: LayoutSettings,
    theme: Theme,
    reset_profile: ResetProfile,
    store: SettingsStore<S>,
    broadcaster: UpdateBroadcaster<M>,
}

impl<S: KeyValueStore, M: TabMessenger> SettingsController<S, M> {
    pub fn new(store: SettingsStore<S>, broadcaster: UpdateBroadcaster<M>) -> Self {
        Self {
            settings: default_settings(),
            theme: Theme::default(),
            reset_profile: RESET_PROFILE,
            store,
            broadcaster,
        }
    }

    /// Restore `profile` on reset instead of the site-native one
    pub fn with_reset_profile(mut self, profile: ResetProfile) -> Self {
        self.reset_profile = profile;
        self
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the defaults with the stored record, if there is one
    ///
    /// A loaded record is also pushed to the active page so a page that
    /// missed earlier updates catches up. It is not saved back.
    pub async fn mount(&mut self) -> bool {
        match self.store.load().await {
            Ok(Some(stored)) => {
                tracing::info!("Loaded stored layout settings");
                self.settings = stored;
                if let Err(e) = self.broadcaster.broadcast(&stored).await {
                    tracing::warn!("Failed to broadcast layout settings: {}", e);
                }
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to load layout settings, keeping defaults: {}", e);
                false
            }
        }
    }

    /// Text typed into a numeric input. Returns false when it was rejected.
    pub async fn input_changed(&mut self, field: LayoutField, raw: &str) -> bool {
        match checked_field_update(&self.settings, field, raw) {
            Some(next) => self.commit(next).await,
            None => false,
        }
    }

    pub async fn slider_changed(&mut self, field: LayoutField, value: u32) -> bool {
        match checked_slider_value(&self.settings, field, value) {
            Some(next) => self.commit(next).await,
            None => false,
        }
    }

    pub async fn combine_margins_changed(&mut self, enabled: bool) -> bool {
        let next = apply_combine_margins_toggle(&self.settings, enabled);
        self.commit(next).await
    }

    pub async fn hide_shorts_changed(&mut self, hidden: bool) -> bool {
        let next = apply_hide_shorts(&self.settings, hidden);
        self.commit(next).await
    }

    pub async fn apply_in_subscriptions_changed(&mut self, enabled: bool) -> bool {
        let next = apply_in_subscriptions(&self.settings, enabled);
        self.commit(next).await
    }

    pub async fn reset_to_default(&mut self) -> bool {
        tracing::info!("Resetting layout settings to {:?}", self.reset_profile);
        let next = self.reset_profile.settings();
        self.commit(next).await
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    async fn commit(&mut self, next: LayoutSettings) -> bool {
        self.settings = next;

        let (saved, sent) = tokio::join!(
            self.store.save(&next),
            self.broadcaster.broadcast(&next)
        );
        if let Err(e) = saved {
            tracing::warn!("Failed to save layout settings: {}", e);
        }
        if let Err(e) = sent {
            tracing::warn!("Failed to broadcast layout settings: {}", e);
        }
        true
    }
}
