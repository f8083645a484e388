use std::fmt;
use std::io;

use thiserror::Error;

/// Terminal failures of an extraction or serialization run.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unsupported output format '{name}' (supported: {})", .supported.join(", "))]
    UnsupportedFormat {
        name: String,
        supported: Vec<&'static str>,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Extraction cancelled")]
    Cancelled,
}

/// Payload clause that a grammar reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Position,
    Size,
    Color,
    Font,
    Screen,
    Center,
}

impl Clause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Clause::Position => "Position",
            Clause::Size => "Size",
            Clause::Color => "Color",
            Clause::Font => "Font",
            Clause::Screen => "Screen",
            Clause::Center => "Center",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line matched a grammar's keyword shape but a field did not parse.
///
/// Never fatal: the line is dropped and extraction continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {clause}({token}) in {grammar} line")]
pub struct MalformedPayload {
    pub grammar: &'static str,
    pub clause: Clause,
    pub token: String,
}

impl MalformedPayload {
    pub fn new(grammar: &'static str, clause: Clause, token: &str) -> Self {
        Self {
            grammar,
            clause,
            token: token.to_string(),
        }
    }
}

/// Failures of the companion reader.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Unsupported input format '{0}'")]
    UnsupportedFormat(String),

    #[error("Unsupported schema version '{0}'")]
    UnsupportedVersion(String),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid XML document at line {line}: {reason}")]
    Xml { line: usize, reason: String },

    #[error("Invalid {field} value '{value}' in element {id}")]
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Document is not valid UTF-8")]
    Encoding,
}
