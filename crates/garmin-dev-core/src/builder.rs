use std::collections::HashMap;

use crate::document::{Element, Screen, UiStateDocument};
use crate::element::ElementSpec;

/// Accumulates element specs into a [`UiStateDocument`].
///
/// Identifiers are `<kind>_<n>` where `n` counts occurrences of that kind
/// starting at 1. Assignment depends only on arrival order. Identical specs
/// are not merged: the log is a trace of render calls.
#[derive(Debug, Default)]
pub struct StateBuilder {
    counters: HashMap<String, usize>,
    document: UiStateDocument,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec and return the identifier assigned to it.
    pub fn push(&mut self, spec: ElementSpec) -> &str {
        let counter = self.counters.entry(spec.kind.clone()).or_insert(0);
        *counter += 1;
        let id = format!("{}_{}", spec.kind, counter);

        self.document.elements.push(Element { id, spec });
        self.document
            .elements
            .last()
            .map(|e| e.id.as_str())
            .unwrap_or_default()
    }

    /// Record the screen descriptor. The first descriptor of a run wins.
    pub fn set_screen(&mut self, screen: Screen) -> bool {
        if self.document.metadata.screen.is_some() {
            return false;
        }
        self.document.metadata.screen = Some(screen);
        true
    }

    pub fn set_device(&mut self, device: impl Into<String>) {
        self.document.metadata.device = Some(device.into());
    }

    pub fn len(&self) -> usize {
        self.document.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.elements.is_empty()
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.counters.get(kind).copied().unwrap_or(0)
    }

    pub fn finish(self) -> UiStateDocument {
        self.document
    }
}
