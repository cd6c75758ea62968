//! Layout settings model
//!
//! The single flat record that is persisted, broadcast and applied, plus the
//! pure update rules the settings form goes through. Every operation returns
//! a new record; invalid input hands back the current one untouched.

use crate::config::{
    MAX_ITEMS_PER_ROW, MAX_MARGIN, MAX_MAX_WIDTH, MAX_MIN_WIDTH, MIN_ITEMS_PER_ROW, MIN_MARGIN,
    MIN_MAX_WIDTH, MIN_MIN_WIDTH,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout configuration for the feed grid
///
/// Field names serialize in camelCase so stored records and messages stay
/// readable by the page script. Missing fields fall back to the default
/// profile, which lets records written before `applyInSubscriptions`
/// existed still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    pub max_width: u32,
    pub min_width: u32,
    pub row_margin: u32,
    pub item_margin: u32,
    pub items_per_row: u32,
    pub combine_margins: bool,
    pub hide_shorts: bool,
    pub apply_in_subscriptions: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        default_settings()
    }
}

impl LayoutSettings {
    /// Repair a record that came from outside the form (storage or a
    /// message). Numeric fields outside their bounds take the default
    /// profile's value, then the margin coupling is restored with
    /// `item_margin` winning, as it does when the toggle is switched on.
    pub fn normalized(mut self) -> Self {
        let fallback = default_settings();
        for field in LayoutField::ALL {
            let value = field.get(&self);
            if !field.accepts(value) {
                tracing::warn!("Replacing out-of-range {} value {}", field, value);
                field.set(&mut self, field.get(&fallback));
            }
        }

        if self.combine_margins && self.row_margin != self.item_margin {
            self.row_margin = self.item_margin;
        }
        self
    }
}

/// The two named profiles the extension has shipped with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetProfile {
    /// Denser grid used on first run
    Compact,
    /// Matches the site's own unmodified layout
    SiteNative,
}

/// Profile restored by "reset to default"
pub const RESET_PROFILE: ResetProfile = ResetProfile::SiteNative;

impl ResetProfile {
    pub fn settings(self) -> LayoutSettings {
        match self {
            ResetProfile::Compact => LayoutSettings {
                max_width: 360,
                min_width: 280,
                row_margin: 24,
                item_margin: 24,
                items_per_row: 4,
                combine_margins: false,
                hide_shorts: false,
                apply_in_subscriptions: true,
            },
            ResetProfile::SiteNative => LayoutSettings {
                max_width: 700,
                min_width: 327,
                row_margin: 32,
                item_margin: 16,
                items_per_row: 3,
                combine_margins: false,
                hide_shorts: false,
                apply_in_subscriptions: true,
            },
        }
    }
}

/// Initial in-memory configuration
pub fn default_settings() -> LayoutSettings {
    ResetProfile::Compact.settings()
}

/// Configuration restored by "reset to default"
pub fn reset_settings() -> LayoutSettings {
    RESET_PROFILE.settings()
}

/// Numeric fields editable through an input box or slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutField {
    MaxWidth,
    MinWidth,
    RowMargin,
    ItemMargin,
    ItemsPerRow,
}

impl LayoutField {
    pub const ALL: [LayoutField; 5] = [
        LayoutField::MaxWidth,
        LayoutField::MinWidth,
        LayoutField::RowMargin,
        LayoutField::ItemMargin,
        LayoutField::ItemsPerRow,
    ];

    /// Wire name, identical to the serialized field name
    pub fn name(self) -> &'static str {
        match self {
            LayoutField::MaxWidth => "maxWidth",
            LayoutField::MinWidth => "minWidth",
            LayoutField::RowMargin => "rowMargin",
            LayoutField::ItemMargin => "itemMargin",
            LayoutField::ItemsPerRow => "itemsPerRow",
        }
    }

    /// Inclusive range of accepted values
    pub fn bounds(self) -> (u32, u32) {
        match self {
            LayoutField::MaxWidth => (MIN_MAX_WIDTH, MAX_MAX_WIDTH),
            LayoutField::MinWidth => (MIN_MIN_WIDTH, MAX_MIN_WIDTH),
            LayoutField::RowMargin | LayoutField::ItemMargin => (MIN_MARGIN, MAX_MARGIN),
            LayoutField::ItemsPerRow => (MIN_ITEMS_PER_ROW, MAX_ITEMS_PER_ROW),
        }
    }

    pub fn accepts(self, value: u32) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }

    pub fn is_margin(self) -> bool {
        matches!(self, LayoutField::RowMargin | LayoutField::ItemMargin)
    }

    pub fn get(self, settings: &LayoutSettings) -> u32 {
        match self {
            LayoutField::MaxWidth => settings.max_width,
            LayoutField::MinWidth => settings.min_width,
            LayoutField::RowMargin => settings.row_margin,
            LayoutField::ItemMargin => settings.item_margin,
            LayoutField::ItemsPerRow => settings.items_per_row,
        }
    }

    fn set(self, settings: &mut LayoutSettings, value: u32) {
        match self {
            LayoutField::MaxWidth => settings.max_width = value,
            LayoutField::MinWidth => settings.min_width = value,
            LayoutField::RowMargin => settings.row_margin = value,
            LayoutField::ItemMargin => settings.item_margin = value,
            LayoutField::ItemsPerRow => settings.items_per_row = value,
        }
    }
}

impl fmt::Display for LayoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| AppError::InvalidField(s.to_string()))
    }
}

/// Apply text typed into a numeric field
///
/// Anything that is not an integer inside the field's bounds is ignored and
/// `current` is returned as-is.
pub fn apply_field_update(current: &LayoutSettings, field: LayoutField, raw: &str) -> LayoutSettings {
    checked_field_update(current, field, raw).unwrap_or(*current)
}

/// Like [`apply_field_update`], but `None` when the input was rejected
pub fn checked_field_update(current: &LayoutSettings, field: LayoutField, raw: &str) -> Option<LayoutSettings> {
    match raw.trim().parse::<u32>() {
        Ok(value) => checked_slider_value(current, field, value),
        Err(_) => {
            tracing::debug!("Ignoring non-numeric input {:?} for {}", raw, field);
            None
        }
    }
}

/// Apply an already numeric value, as delivered by a slider
pub fn apply_slider_value(current: &LayoutSettings, field: LayoutField, value: u32) -> LayoutSettings {
    checked_slider_value(current, field, value).unwrap_or(*current)
}

pub fn checked_slider_value(current: &LayoutSettings, field: LayoutField, value: u32) -> Option<LayoutSettings> {
    if !field.accepts(value) {
        tracing::debug!("Ignoring out-of-range value {} for {}", value, field);
        return None;
    }

    let mut next = *current;
    field.set(&mut next, value);
    if next.combine_margins && field.is_margin() {
        next.row_margin = value;
        next.item_margin = value;
    }
    Some(next)
}

/// Switch margin coupling on or off
///
/// Enabling copies `item_margin` into `row_margin`. Disabling leaves both
/// values where they are until one of them is edited.
pub fn apply_combine_margins_toggle(current: &LayoutSettings, enabled: bool) -> LayoutSettings {
    let mut next = *current;
    next.combine_margins = enabled;
    if enabled {
        next.row_margin = next.item_margin;
    }
    next
}

pub fn apply_hide_shorts(current: &LayoutSettings, hidden: bool) -> LayoutSettings {
    LayoutSettings {
        hide_shorts: hidden,
        ..*current
    }
}

pub fn apply_in_subscriptions(current: &LayoutSettings, enabled: bool) -> LayoutSettings {
    LayoutSettings {
        apply_in_subscriptions: enabled,
        ..*current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined(margin: u32) -> LayoutSettings {
        LayoutSettings {
            row_margin: margin,
            item_margin: margin,
            combine_margins: true,
            ..default_settings()
        }
    }

    #[test]
    fn test_default_profile_values() {
        let s = default_settings();
        assert_eq!(s.max_width, 360);
        assert_eq!(s.min_width, 280);
        assert_eq!(s.row_margin, 24);
        assert_eq!(s.item_margin, 24);
        assert_eq!(s.items_per_row, 4);
        assert!(!s.combine_margins);
        assert!(!s.hide_shorts);
        assert!(s.apply_in_subscriptions);
    }

    #[test]
    fn test_reset_restores_site_native_profile() {
        let expected = LayoutSettings {
            max_width: 700,
            min_width: 327,
            row_margin: 32,
            items_per_row: 3,
            item_margin: 16,
            combine_margins: false,
            hide_shorts: false,
            apply_in_subscriptions: true,
        };
        assert_eq!(reset_settings(), expected);
        assert_ne!(reset_settings(), default_settings());
    }

    #[test]
    fn test_non_numeric_input_is_ignored() {
        let s = default_settings();
        assert_eq!(apply_field_update(&s, LayoutField::MaxWidth, "abc"), s);
        assert_eq!(apply_field_update(&s, LayoutField::MaxWidth, ""), s);
        assert_eq!(apply_field_update(&s, LayoutField::MaxWidth, "-5"), s);
        assert_eq!(apply_field_update(&s, LayoutField::MaxWidth, "12.5"), s);
    }

    #[test]
    fn test_out_of_range_input_is_ignored() {
        let s = default_settings();
        assert_eq!(apply_field_update(&s, LayoutField::MaxWidth, "901"), s);
        assert_eq!(apply_field_update(&s, LayoutField::MinWidth, "199"), s);
        assert_eq!(apply_field_update(&s, LayoutField::ItemsPerRow, "0"), s);
        assert_eq!(apply_slider_value(&s, LayoutField::RowMargin, 49), s);
    }

    #[test]
    fn test_valid_input_sets_only_that_field() {
        let s = default_settings();
        let next = apply_field_update(&s, LayoutField::MaxWidth, " 640 ");
        assert_eq!(next.max_width, 640);
        assert_eq!(LayoutSettings { max_width: s.max_width, ..next }, s);
    }

    #[test]
    fn test_margin_edit_couples_when_combined() {
        let s = combined(10);
        let next = apply_field_update(&s, LayoutField::ItemMargin, "20");
        assert_eq!(next.row_margin, 20);
        assert_eq!(next.item_margin, 20);

        let next = apply_slider_value(&next, LayoutField::RowMargin, 8);
        assert_eq!(next.row_margin, 8);
        assert_eq!(next.item_margin, 8);
    }

    #[test]
    fn test_margin_edit_independent_when_not_combined() {
        let s = default_settings();
        let next = apply_field_update(&s, LayoutField::RowMargin, "40");
        assert_eq!(next.row_margin, 40);
        assert_eq!(next.item_margin, s.item_margin);
    }

    #[test]
    fn test_enabling_combine_copies_item_margin() {
        let s = LayoutSettings {
            row_margin: 30,
            item_margin: 12,
            ..default_settings()
        };
        let next = apply_combine_margins_toggle(&s, true);
        assert!(next.combine_margins);
        assert_eq!(next.row_margin, 12);
        assert_eq!(next.item_margin, 12);
    }

    #[test]
    fn test_disabling_combine_keeps_values_until_edit() {
        let s = combined(14);
        let next = apply_combine_margins_toggle(&s, false);
        assert!(!next.combine_margins);
        assert_eq!((next.row_margin, next.item_margin), (14, 14));

        let next = apply_field_update(&next, LayoutField::RowMargin, "30");
        assert_eq!((next.row_margin, next.item_margin), (30, 14));
    }

    #[test]
    fn test_coupling_holds_across_operation_sequence() {
        let mut s = default_settings();
        let steps: Vec<Box<dyn Fn(&LayoutSettings) -> LayoutSettings>> = vec![
            Box::new(|s: &LayoutSettings| apply_field_update(s, LayoutField::RowMargin, "40")),
            Box::new(|s: &LayoutSettings| apply_combine_margins_toggle(s, true)),
            Box::new(|s: &LayoutSettings| apply_field_update(s, LayoutField::RowMargin, "5")),
            Box::new(|s: &LayoutSettings| apply_slider_value(s, LayoutField::ItemMargin, 33)),
            Box::new(|s: &LayoutSettings| apply_field_update(s, LayoutField::ItemMargin, "oops")),
            Box::new(|s: &LayoutSettings| apply_hide_shorts(s, true)),
            Box::new(|s: &LayoutSettings| apply_field_update(s, LayoutField::MaxWidth, "500")),
        ];
        for step in steps {
            s = step(&s);
            if s.combine_margins {
                assert_eq!(s.row_margin, s.item_margin);
            }
        }
        assert_eq!(s.item_margin, 33);
    }

    #[test]
    fn test_flag_updates() {
        let s = default_settings();
        assert!(apply_hide_shorts(&s, true).hide_shorts);
        assert!(!apply_in_subscriptions(&s, false).apply_in_subscriptions);
    }

    #[test]
    fn test_normalized_repairs_coupling() {
        let s = LayoutSettings {
            row_margin: 3,
            item_margin: 9,
            combine_margins: true,
            ..default_settings()
        };
        let n = s.normalized();
        assert_eq!((n.row_margin, n.item_margin), (9, 9));

        let loose = LayoutSettings {
            combine_margins: false,
            ..s
        };
        assert_eq!(loose.normalized(), loose);
    }

    #[test]
    fn test_checked_updates_report_rejection() {
        let s = reset_settings();
        assert_eq!(checked_field_update(&s, LayoutField::MaxWidth, "wide"), None);
        assert_eq!(checked_slider_value(&s, LayoutField::ItemsPerRow, 0), None);

        // re-asserting the current value is still accepted
        assert_eq!(checked_field_update(&s, LayoutField::MaxWidth, "700"), Some(s));
        assert_eq!(checked_slider_value(&s, LayoutField::ItemsPerRow, 3), Some(s));
    }

    #[test]
    fn test_normalized_replaces_out_of_range_fields() {
        let s = LayoutSettings {
            max_width: 5000,
            min_width: 100,
            row_margin: 60,
            items_per_row: 0,
            hide_shorts: true,
            ..reset_settings()
        };
        let n = s.normalized();
        let fallback = default_settings();
        assert_eq!(n.max_width, fallback.max_width);
        assert_eq!(n.min_width, fallback.min_width);
        assert_eq!(n.row_margin, fallback.row_margin);
        assert_eq!(n.items_per_row, fallback.items_per_row);
        assert_eq!(n.item_margin, 16);
        assert!(n.hide_shorts);

        for field in LayoutField::ALL {
            assert!(field.accepts(field.get(&n)));
        }
    }

    #[test]
    fn test_normalized_couples_after_range_repair() {
        let s = LayoutSettings {
            row_margin: 10,
            item_margin: 99,
            combine_margins: true,
            ..reset_settings()
        };
        let n = s.normalized();
        assert_eq!((n.row_margin, n.item_margin), (24, 24));
    }

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for field in LayoutField::ALL {
            assert_eq!(field.name().parse::<LayoutField>().unwrap(), field);
        }
        assert!("width".parse::<LayoutField>().is_err());
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let json = serde_json::to_value(reset_settings()).unwrap();
        assert_eq!(json["maxWidth"], 700);
        assert_eq!(json["itemsPerRow"], 3);
        assert_eq!(json["applyInSubscriptions"], true);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let json = r#"{"maxWidth":500,"minWidth":300,"rowMargin":10,"itemsPerRow":5,
            "itemMargin":10,"combineMargins":true,"hideShorts":true}"#;
        let s: LayoutSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.max_width, 500);
        assert!(s.hide_shorts);
        assert!(s.apply_in_subscriptions);
    }
}
