//! Services module
//!
//! Extension-UI side of the propagation: the form controller and the
//! broadcaster that pushes its changes to the active page.

pub mod broadcast;
pub mod controller;

pub use broadcast::{ChannelMessenger, Delivery, DetachedMessenger, TabId, TabMessenger, UpdateBroadcaster};
pub use controller::{SettingsController, Theme};
