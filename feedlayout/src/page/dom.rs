//! Host page surface
//!
//! The page script only ever touches the host document through
//! [`PageDocument`]: it reads the current route, finds elements by their
//! structural role and writes inline styles. [`MemoryDocument`] is the
//! in-process implementation used by the CLI preview and the tests.

use crate::config::{GRID_CONTAINER_SELECTOR, RICH_SECTION_SELECTOR};
use std::collections::BTreeMap;

/// Structural roles the layout rules target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    GridContainer,
    RichSection,
}

impl ElementRole {
    pub fn selector(self) -> &'static str {
        match self {
            ElementRole::GridContainer => GRID_CONTAINER_SELECTOR,
            ElementRole::RichSection => RICH_SECTION_SELECTOR,
        }
    }
}

/// Inline display state of a section container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Hidden,
    /// Inline display cleared, the host stylesheet decides
    Visible,
}

impl Display {
    pub fn css_value(self) -> &'static str {
        match self {
            Display::Hidden => "none",
            Display::Visible => "",
        }
    }
}

/// Opaque handle to an element, valid until the element is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Live document the layout rules are applied to
pub trait PageDocument {
    /// Path component of the current location, e.g. `/feed/subscriptions`
    fn pathname(&self) -> String;

    /// Every element currently in the document with the given role
    fn query_all(&self, role: ElementRole) -> Vec<NodeId>;

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str);

    fn set_display(&mut self, node: NodeId, display: Display);
}

#[derive(Debug, Clone)]
struct MemoryElement {
    role: ElementRole,
    properties: BTreeMap<String, String>,
    display: Display,
}

/// In-memory document
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pathname: String,
    elements: BTreeMap<NodeId, MemoryElement>,
    next_id: u64,
    style_writes: usize,
}

impl MemoryDocument {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            elements: BTreeMap::new(),
            next_id: 1,
            style_writes: 0,
        }
    }

    /// Insert an element with no inline styles
    pub fn add_element(&mut self, role: ElementRole) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            MemoryElement {
                role,
                properties: BTreeMap::new(),
                display: Display::Visible,
            },
        );
        id
    }

    pub fn remove_element(&mut self, node: NodeId) -> bool {
        self.elements.remove(&node).is_some()
    }

    /// Remove every element with the given role, as a client-side route
    /// change does when it tears down the feed
    pub fn clear_role(&mut self, role: ElementRole) {
        self.elements.retain(|_, element| element.role != role);
    }

    /// Change the current route without touching elements
    pub fn navigate(&mut self, pathname: impl Into<String>) {
        self.pathname = pathname.into();
    }

    /// Custom property value set inline on the node
    pub fn style_of(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements
            .get(&node)
            .and_then(|element| element.properties.get(name))
            .map(String::as_str)
    }

    /// All inline custom properties of the node, sorted by name
    pub fn properties_of(&self, node: NodeId) -> Vec<(String, String)> {
        self.elements
            .get(&node)
            .map(|element| {
                element
                    .properties
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn display_of(&self, node: NodeId) -> Option<Display> {
        self.elements.get(&node).map(|element| element.display)
    }

    /// Number of style writes performed since creation
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl PageDocument for MemoryDocument {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn query_all(&self, role: ElementRole) -> Vec<NodeId> {
        self.elements
            .iter()
            .filter(|(_, element)| element.role == role)
            .map(|(id, _)| *id)
            .collect()
    }

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.properties.insert(name.to_string(), value.to_string());
            self.style_writes += 1;
        }
    }

    fn set_display(&mut self, node: NodeId, display: Display) {
        if let Some(element) = self.elements.get_mut(&node) {
            element.display = display;
            self.style_writes += 1;
        }
    }
}
