//! Layout applier
//!
//! Realizes a [`LayoutSettings`] on the live document. Every call re-queries
//! the document, since the host re-renders its grid on each navigation and
//! there is no stable element to hold on to. Applying the same settings twice
//! leaves the document in the same state.

use crate::config::{
    PROP_ITEMS_PER_ROW, PROP_ITEM_MARGIN, PROP_ITEM_MAX_WIDTH, PROP_ITEM_MIN_WIDTH,
    PROP_ROW_MARGIN, SUBSCRIPTIONS_PATH,
};
use crate::model::{LayoutSettings, ResetProfile};
use crate::page::dom::{Display, ElementRole, PageDocument};

/// The five grid values written as custom properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyle {
    pub max_width: u32,
    pub min_width: u32,
    pub row_margin: u32,
    pub items_per_row: u32,
    pub item_margin: u32,
}

impl GridStyle {
    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self {
            max_width: settings.max_width,
            min_width: settings.min_width,
            row_margin: settings.row_margin,
            items_per_row: settings.items_per_row,
            item_margin: settings.item_margin,
        }
    }

    /// Values matching the host's unmodified grid
    pub fn site_native() -> Self {
        Self::from_settings(&ResetProfile::SiteNative.settings())
    }

    /// Property/value pairs in the order of [`crate::config::GRID_CUSTOM_PROPERTIES`]
    pub fn declarations(&self) -> [(&'static str, String); 5] {
        [
            (PROP_ITEM_MAX_WIDTH, format!("{}px", self.max_width)),
            (PROP_ITEM_MIN_WIDTH, format!("{}px", self.min_width)),
            (PROP_ROW_MARGIN, format!("{}px", self.row_margin)),
            (PROP_ITEMS_PER_ROW, self.items_per_row.to_string()),
            (PROP_ITEM_MARGIN, format!("{}px", self.item_margin)),
        ]
    }
}

/// What a single apply pass touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    pub grids: usize,
    pub sections: usize,
    /// The subscriptions route was opted out and native values were written
    pub used_fallback: bool,
}

/// True for the subscriptions feed and any route nested under it
pub fn is_subscriptions_route(path: &str) -> bool {
    path == SUBSCRIPTIONS_PATH
        || path
            .strip_prefix(SUBSCRIPTIONS_PATH)
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
}

fn write_grid_style<D: PageDocument + ?Sized>(doc: &mut D, style: &GridStyle) -> usize {
    let grids = doc.query_all(ElementRole::GridContainer);
    let declarations = style.declarations();
    for node in &grids {
        for (name, value) in &declarations {
            doc.set_style_property(*node, name, value);
        }
    }
    grids.len()
}

/// Apply `settings` to every grid container and rich section in `doc`
///
/// On the subscriptions route with `apply_in_subscriptions` off, grids get
/// the site-native values and section visibility is left as it is.
pub fn apply_layout<D: PageDocument + ?Sized>(doc: &mut D, settings: &LayoutSettings) -> ApplyReport {
    if is_subscriptions_route(&doc.pathname()) && !settings.apply_in_subscriptions {
        let grids = write_grid_style(doc, &GridStyle::site_native());
        return ApplyReport {
            grids,
            sections: 0,
            used_fallback: true,
        };
    }

    let grids = write_grid_style(doc, &GridStyle::from_settings(settings));

    let display = if settings.hide_shorts {
        Display::Hidden
    } else {
        Display::Visible
    };
    let sections = doc.query_all(ElementRole::RichSection);
    for node in &sections {
        doc.set_display(*node, display);
    }

    ApplyReport {
        grids,
        sections: sections.len(),
        used_fallback: false,
    }
}

/// Put every grid container back to the host's own values
pub fn apply_site_default<D: PageDocument + ?Sized>(doc: &mut D) -> usize {
    write_grid_style(doc, &GridStyle::site_native())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRID_CUSTOM_PROPERTIES;
    use crate::model::{default_settings, reset_settings};
    use crate::page::dom::MemoryDocument;

    fn custom() -> LayoutSettings {
        LayoutSettings {
            max_width: 420,
            min_width: 250,
            row_margin: 8,
            item_margin: 4,
            items_per_row: 6,
            combine_margins: false,
            hide_shorts: true,
            apply_in_subscriptions: false,
        }
    }

    fn feed(path: &str) -> MemoryDocument {
        let mut doc = MemoryDocument::new(path);
        doc.add_element(ElementRole::GridContainer);
        doc.add_element(ElementRole::GridContainer);
        doc.add_element(ElementRole::RichSection);
        doc
    }

    fn grid_values(doc: &MemoryDocument) -> Vec<Vec<(String, String)>> {
        doc.query_all(ElementRole::GridContainer)
            .into_iter()
            .map(|node| doc.properties_of(node))
            .collect()
    }

    #[test]
    fn test_applies_all_five_properties_to_every_grid() {
        let mut doc = feed("/");
        let report = apply_layout(&mut doc, &custom());

        assert_eq!(report.grids, 2);
        assert_eq!(report.sections, 1);
        assert!(!report.used_fallback);
        for node in doc.query_all(ElementRole::GridContainer) {
            assert_eq!(doc.style_of(node, PROP_ITEM_MAX_WIDTH), Some("420px"));
            assert_eq!(doc.style_of(node, PROP_ITEM_MIN_WIDTH), Some("250px"));
            assert_eq!(doc.style_of(node, PROP_ROW_MARGIN), Some("8px"));
            assert_eq!(doc.style_of(node, PROP_ITEMS_PER_ROW), Some("6"));
            assert_eq!(doc.style_of(node, PROP_ITEM_MARGIN), Some("4px"));
            assert_eq!(doc.properties_of(node).len(), GRID_CUSTOM_PROPERTIES.len());
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut doc = feed("/");
        apply_layout(&mut doc, &custom());
        let first = grid_values(&doc);
        let section = doc.query_all(ElementRole::RichSection)[0];
        let first_display = doc.display_of(section);

        apply_layout(&mut doc, &custom());
        assert_eq!(grid_values(&doc), first);
        assert_eq!(doc.display_of(section), first_display);
    }

    #[test]
    fn test_shorts_toggle() {
        let mut doc = feed("/");
        let section = doc.query_all(ElementRole::RichSection)[0];

        apply_layout(&mut doc, &custom());
        assert_eq!(doc.display_of(section), Some(Display::Hidden));

        let shown = LayoutSettings {
            hide_shorts: false,
            ..custom()
        };
        apply_layout(&mut doc, &shown);
        assert_eq!(doc.display_of(section), Some(Display::Visible));
    }

    #[test]
    fn test_subscriptions_opt_out_uses_native_values_and_skips_sections() {
        let mut doc = feed(SUBSCRIPTIONS_PATH);
        let section = doc.query_all(ElementRole::RichSection)[0];
        doc.set_display(section, Display::Hidden);

        let settings = LayoutSettings {
            hide_shorts: false,
            ..custom()
        };
        let report = apply_layout(&mut doc, &settings);

        assert!(report.used_fallback);
        assert_eq!(report.sections, 0);
        for node in doc.query_all(ElementRole::GridContainer) {
            assert_eq!(doc.style_of(node, PROP_ITEM_MAX_WIDTH), Some("700px"));
            assert_eq!(doc.style_of(node, PROP_ITEM_MIN_WIDTH), Some("327px"));
            assert_eq!(doc.style_of(node, PROP_ROW_MARGIN), Some("32px"));
            assert_eq!(doc.style_of(node, PROP_ITEMS_PER_ROW), Some("3"));
            assert_eq!(doc.style_of(node, PROP_ITEM_MARGIN), Some("16px"));
        }
        // left as a previous visit set it
        assert_eq!(doc.display_of(section), Some(Display::Hidden));
    }

    #[test]
    fn test_subscriptions_opt_in_applies_settings() {
        let mut doc = feed(SUBSCRIPTIONS_PATH);
        let settings = LayoutSettings {
            apply_in_subscriptions: true,
            ..custom()
        };
        let report = apply_layout(&mut doc, &settings);

        assert!(!report.used_fallback);
        let grid = doc.query_all(ElementRole::GridContainer)[0];
        assert_eq!(doc.style_of(grid, PROP_ITEMS_PER_ROW), Some("6"));
    }

    #[test]
    fn test_opt_out_only_matters_on_subscriptions() {
        let mut doc = feed("/");
        let report = apply_layout(&mut doc, &custom());
        assert!(!report.used_fallback);
    }

    #[test]
    fn test_empty_document_is_a_no_op() {
        let mut doc = MemoryDocument::new("/");
        let report = apply_layout(&mut doc, &default_settings());
        assert_eq!(report, ApplyReport::default());
        assert_eq!(doc.style_writes(), 0);

        let mut doc = MemoryDocument::new(SUBSCRIPTIONS_PATH);
        apply_layout(&mut doc, &custom());
        assert_eq!(doc.style_writes(), 0);
    }

    #[test]
    fn test_site_default_matches_reset_profile() {
        let mut doc = feed("/");
        apply_layout(&mut doc, &custom());
        assert_eq!(apply_site_default(&mut doc), 2);

        let mut expected = feed("/");
        apply_layout(&mut expected, &reset_settings());
        assert_eq!(grid_values(&doc), grid_values(&expected));
    }

    #[test]
    fn test_subscriptions_route_matching() {
        assert!(is_subscriptions_route("/feed/subscriptions"));
        assert!(is_subscriptions_route("/feed/subscriptions/shorts"));
        assert!(!is_subscriptions_route("/feed/subscriptionsX"));
        assert!(!is_subscriptions_route("/"));
        assert!(!is_subscriptions_route("/feed/trending"));
    }
}
