//! Interchange formats for [`UiStateDocument`].
//!
//! Both built-in serializers emit fields in `ElementSpec` declaration order
//! (`id`, `kind`, `label`, position, size, color, font, text) so the XML and
//! JSON forms carry the same triples and diff cleanly across runs.

pub(crate) mod dto;
mod json;
pub(crate) mod xml;

pub use json::JsonSerializer;
pub use xml::XmlSerializer;

use crate::document::UiStateDocument;
use crate::error::EngineError;

pub trait Serializer: Send + Sync {
    /// Lower-case format name used for registry lookup.
    fn format_name(&self) -> &'static str;

    fn serialize(&self, document: &UiStateDocument) -> Result<Vec<u8>, EngineError>;
}

/// Maps an output-format name to its serializer.
pub struct FormatRegistry {
    serializers: Vec<Box<dyn Serializer>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self {
            serializers: Vec::new(),
        }
    }

    /// `xml` (the default format) and `json`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(XmlSerializer::new()));
        registry.register(Box::new(JsonSerializer::new()));
        registry
    }

    /// Add a serializer, replacing any existing one with the same name.
    pub fn register(&mut self, serializer: Box<dyn Serializer>) {
        let name = serializer.format_name();
        match self
            .serializers
            .iter_mut()
            .find(|s| s.format_name().eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = serializer,
            None => self.serializers.push(serializer),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.serializers.iter().map(|s| s.format_name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Case-insensitive exact-name lookup.
    pub fn lookup(&self, name: &str) -> Result<&dyn Serializer, EngineError> {
        self.serializers
            .iter()
            .find(|s| s.format_name().eq_ignore_ascii_case(name))
            .map(|s| &**s)
            .ok_or_else(|| EngineError::UnsupportedFormat {
                name: name.to_string(),
                supported: self.names(),
            })
    }

    pub fn serialize(
        &self,
        document: &UiStateDocument,
        format: &str,
    ) -> Result<Vec<u8>, EngineError> {
        self.lookup(format)?.serialize(document)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Serialize with the built-in formats.
pub fn serialize(document: &UiStateDocument, format: &str) -> Result<Vec<u8>, EngineError> {
    FormatRegistry::with_defaults().serialize(document, format)
}
