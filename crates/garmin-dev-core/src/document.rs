use crate::element::{ElementSpec, Position};

/// Schema version stamped on every interchange document.
pub const SCHEMA_VERSION: &str = "1.0";

/// One element of a UI-state document with its generated identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub spec: ElementSpec,
}

/// Screen geometry announced by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub center: Position,
}

/// Optional capture context. Omitted from output when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub device: Option<String>,
    pub screen: Option<Screen>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.device.is_none() && self.screen.is_none()
    }
}

/// Canonical output of one extraction run.
///
/// Elements are kept in order of first occurrence in the source log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStateDocument {
    pub version: String,
    pub metadata: Metadata,
    pub elements: Vec<Element>,
}

impl UiStateDocument {
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            metadata: Metadata::default(),
            elements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.id.as_str())
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.spec.kind == kind)
    }
}

impl Default for UiStateDocument {
    fn default() -> Self {
        Self::new()
    }
}
