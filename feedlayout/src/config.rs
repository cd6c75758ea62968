//! Layout configuration constants
//!
//! Central location for field bounds, storage and messaging identifiers,
//! and the selectors and custom properties shared with the host page.

// ===== Field Bounds =====

/// Smallest accepted thumbnail max width in pixels
pub const MIN_MAX_WIDTH: u32 = 200;
/// Largest accepted thumbnail max width in pixels
pub const MAX_MAX_WIDTH: u32 = 900;

/// Smallest accepted thumbnail min width in pixels
pub const MIN_MIN_WIDTH: u32 = 200;
/// Largest accepted thumbnail min width in pixels
pub const MAX_MIN_WIDTH: u32 = 400;

/// Smallest accepted row or item margin in pixels
pub const MIN_MARGIN: u32 = 0;
/// Largest accepted row or item margin in pixels
pub const MAX_MARGIN: u32 = 48;

/// Fewest thumbnails per grid row
pub const MIN_ITEMS_PER_ROW: u32 = 1;
/// Most thumbnails per grid row
pub const MAX_ITEMS_PER_ROW: u32 = 10;

// ===== Storage and Messaging =====

/// Key under which the whole settings record is stored
pub const STORAGE_KEY: &str = "youtubeLayoutSettings";

/// Type tag of the only message the page script understands
pub const UPDATE_LAYOUT_MESSAGE: &str = "UPDATE_LAYOUT";

/// File used by the file-backed key-value store
pub const SETTINGS_FILE_NAME: &str = "layout-settings.json";

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "feedlayout";

// ===== Host Page =====

/// Host element laying out video thumbnails
pub const GRID_CONTAINER_SELECTOR: &str = "ytd-rich-grid-renderer";

/// Host element wrapping Shorts shelves and similar promotional rows
pub const RICH_SECTION_SELECTOR: &str = "ytd-rich-section-renderer";

/// Route on which layout rules are gated by `applyInSubscriptions`
pub const SUBSCRIPTIONS_PATH: &str = "/feed/subscriptions";

/// Event the host router dispatches once client-side navigation settles
pub const NAVIGATION_FINISHED_EVENT: &str = "yt-navigate-finish";

/// Custom property for the thumbnail max width
pub const PROP_ITEM_MAX_WIDTH: &str = "--ytd-rich-grid-item-max-width";
/// Custom property for the thumbnail min width
pub const PROP_ITEM_MIN_WIDTH: &str = "--ytd-rich-grid-item-min-width";
/// Custom property for the vertical gap between rows
pub const PROP_ROW_MARGIN: &str = "--ytd-rich-grid-row-margin";
/// Custom property for the number of thumbnails per row
pub const PROP_ITEMS_PER_ROW: &str = "--ytd-rich-grid-items-per-row";
/// Custom property for the horizontal gap between thumbnails
pub const PROP_ITEM_MARGIN: &str = "--ytd-rich-grid-item-margin";

/// Custom properties read by the host stylesheet, in the order of
/// [`crate::page::layout::GridStyle::declarations`]
pub const GRID_CUSTOM_PROPERTIES: [&str; 5] = [
    PROP_ITEM_MAX_WIDTH,
    PROP_ITEM_MIN_WIDTH,
    PROP_ROW_MARGIN,
    PROP_ITEMS_PER_ROW,
    PROP_ITEM_MARGIN,
];
