use super::dto::UiStateDocumentDto;
use super::Serializer;
use crate::document::UiStateDocument;
use crate::error::EngineError;

/// Pretty-printed JSON with a trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, document: &UiStateDocument) -> Result<Vec<u8>, EngineError> {
        let dto = UiStateDocumentDto::from(document);
        let mut out = serde_json::to_vec_pretty(&dto)?;
        out.push(b'\n');
        Ok(out)
    }
}
