//! Messages sent from the settings UI to the page script
//!
//! The wire format is JSON tagged on `type`. `UPDATE_LAYOUT` is the only
//! message today; any other tag decodes to [`LayoutMessage::Unknown`] so
//! older page scripts ignore newer messages instead of failing.

use crate::error::Result;
use crate::model::LayoutSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayoutMessage {
    #[serde(rename = "UPDATE_LAYOUT")]
    UpdateLayout { settings: LayoutSettings },

    #[serde(other)]
    Unknown,
}

impl LayoutMessage {
    pub fn update(settings: LayoutSettings) -> Self {
        LayoutMessage::UpdateLayout { settings }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn parse(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
