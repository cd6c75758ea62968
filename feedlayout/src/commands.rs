//! Commands exposed on the command line
//!
//! All commands follow the pattern:
//! - Take AppState as first parameter
//! - Return Result<T, AppError>
//! - Are async when performing I/O

use crate::app::AppState;
use crate::error::Result;
use crate::model::{LayoutField, LayoutSettings};
use crate::page::{apply_layout, Display, ElementRole, MemoryDocument, PageDocument};
use std::fmt::Write as _;
use std::str::FromStr;

/// Boolean settings that can be switched from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutFlag {
    CombineMargins,
    HideShorts,
    ApplyInSubscriptions,
}

/// Current settings as pretty JSON
pub fn show(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state.controller.settings())?)
}

/// Set a numeric field from raw text. Returns whether the value was accepted.
pub async fn set_field(state: &mut AppState, field: &str, value: &str) -> Result<bool> {
    let field = LayoutField::from_str(field)?;
    let accepted = state.controller.input_changed(field, value).await;
    if !accepted {
        tracing::info!("Rejected {:?}, {} left at {}", value, field, field.get(state.controller.settings()));
    }
    Ok(accepted)
}

pub async fn toggle(state: &mut AppState, flag: LayoutFlag, enabled: bool) -> Result<bool> {
    let controller = &mut state.controller;
    let changed = match flag {
        LayoutFlag::CombineMargins => controller.combine_margins_changed(enabled).await,
        LayoutFlag::HideShorts => controller.hide_shorts_changed(enabled).await,
        LayoutFlag::ApplyInSubscriptions => controller.apply_in_subscriptions_changed(enabled).await,
    };
    Ok(changed)
}

pub async fn reset(state: &mut AppState) -> Result<bool> {
    Ok(state.controller.reset_to_default().await)
}

/// Inline styles the page script would write on a feed at `path`
pub fn preview(state: &AppState, path: &str) -> String {
    render_preview(state.controller.settings(), path)
}

pub fn render_preview(settings: &LayoutSettings, path: &str) -> String {
    let mut doc = MemoryDocument::new(path);
    let grid = doc.add_element(ElementRole::GridContainer);
    doc.add_element(ElementRole::RichSection);
    let report = apply_layout(&mut doc, settings);

    let mut out = String::new();
    let _ = writeln!(out, "{} {{", ElementRole::GridContainer.selector());
    for (name, value) in doc.properties_of(grid) {
        let _ = writeln!(out, "  {}: {};", name, value);
    }
    let _ = writeln!(out, "}}");

    if report.used_fallback {
        let _ = writeln!(out, "/* {} opted out: native grid, sections untouched */", path);
        return out;
    }

    for section in doc.query_all(ElementRole::RichSection) {
        let _ = writeln!(out, "{} {{", ElementRole::RichSection.selector());
        match doc.display_of(section) {
            Some(Display::Hidden) => {
                let _ = writeln!(out, "  display: {};", Display::Hidden.css_value());
            }
            _ => {
                let _ = writeln!(out, "  /* inline display cleared */");
            }
        }
        let _ = writeln!(out, "}}");
    }
    out
}
