//! Extraction engine for garmin-dev.
//!
//! Turns Garmin simulator debug logs into a UI-state document: which elements
//! were rendered, where, how large, in what color and font. The document can
//! be written as XML or JSON and read back.

#![deny(clippy::all)]

mod builder;
mod document;
mod element;
mod error;
mod extractor;
pub mod grammar;
mod options;
mod pipeline;
mod reader;
pub mod serialize;

pub use builder::StateBuilder;
pub use document::Element;
pub use document::Metadata;
pub use document::Screen;
pub use document::UiStateDocument;
pub use document::SCHEMA_VERSION;
pub use element::ElementSpec;
pub use element::FontSize;
pub use element::Position;
pub use element::Rgb;
pub use element::Size;
pub use error::Clause;
pub use error::EngineError;
pub use error::MalformedPayload;
pub use error::ReadError;
pub use extractor::extract as extract_element;
pub use extractor::extract_screen;
pub use grammar::line_category;
pub use grammar::GrammarRegistry;
pub use options::ExtractOptions;
pub use options::KindStyle;
pub use options::NormalizePolicy;
pub use options::UnknownFontPolicy;
pub use pipeline::extract;
pub use pipeline::Extraction;
pub use pipeline::ExtractionStats;
pub use pipeline::LogExtractor;
pub use reader::read_document;
pub use serialize::serialize;
pub use serialize::FormatRegistry;
pub use serialize::Serializer;
