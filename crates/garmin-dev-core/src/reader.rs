//! Companion reader for the interchange formats.
//!
//! Reads what the built-in serializers write. The XML side is a line-oriented
//! reader for the canonical shape (one node per line), not a general XML
//! parser.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::document::{Element, Screen, UiStateDocument, SCHEMA_VERSION};
use crate::element::{ElementSpec, FontSize, Position, Rgb, Size};
use crate::error::ReadError;
use crate::serialize::dto::{FontSizeDto, UiStateDocumentDto};
use crate::serialize::xml::{unescape, ROOT};

/// Parse a serialized document. `format` is matched case-insensitively.
pub fn read_document(bytes: &[u8], format: &str) -> Result<UiStateDocument, ReadError> {
    match format.trim().to_ascii_lowercase().as_str() {
        "json" => read_json(bytes),
        "xml" => read_xml(bytes),
        other => Err(ReadError::UnsupportedFormat(other.to_string())),
    }
}

fn read_json(bytes: &[u8]) -> Result<UiStateDocument, ReadError> {
    let dto: UiStateDocumentDto = serde_json::from_slice(bytes)?;
    if dto.version != SCHEMA_VERSION {
        return Err(ReadError::UnsupportedVersion(dto.version));
    }
    UiStateDocument::try_from(dto)
}

fn read_xml(bytes: &[u8]) -> Result<UiStateDocument, ReadError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ReadError::Encoding)?;
    let mut parser = XmlParser::default();
    let mut last = 0;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        last = number;
        let node = parse_node(line).map_err(|reason| ReadError::Xml {
            line: number,
            reason,
        })?;
        parser.feed(number, node)?;
    }

    if parser.state != State::End {
        return Err(ReadError::Xml {
            line: last,
            reason: "unexpected end of document".to_string(),
        });
    }
    Ok(parser.document)
}

struct NodePatterns {
    prolog: Regex,
    open: Regex,
    close: Regex,
    text: Regex,
    attr: Regex,
}

fn get_patterns() -> &'static NodePatterns {
    static PATTERNS: OnceLock<NodePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NodePatterns {
        prolog: Regex::new(r"^<\?xml[^>]*\?>$").unwrap(),
        open: Regex::new(
            r#"^<(?P<name>[a-z][a-z-]*)(?P<attrs>(?:\s+[a-z][a-z-]*="[^"]*")*)\s*(?P<empty>/)?>$"#,
        )
        .unwrap(),
        close: Regex::new(r"^</(?P<name>[a-z][a-z-]*)>$").unwrap(),
        text: Regex::new(r"^<(?P<name>[a-z][a-z-]*)>(?P<text>[^<]*)</(?P<end>[a-z][a-z-]*)>$")
            .unwrap(),
        attr: Regex::new(r#"(?P<key>[a-z][a-z-]*)="(?P<value>[^"]*)""#).unwrap(),
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Node<'l> {
    Prolog,
    Open {
        name: &'l str,
        attrs: Vec<(&'l str, String)>,
        empty: bool,
    },
    Close(&'l str),
    Text {
        name: &'l str,
        text: String,
    },
}

fn parse_node(line: &str) -> Result<Node<'_>, String> {
    let patterns = get_patterns();

    if patterns.prolog.is_match(line) {
        return Ok(Node::Prolog);
    }

    if let Some(caps) = patterns.text.captures(line) {
        let name = caps.name("name").map_or("", |m| m.as_str());
        let end = caps.name("end").map_or("", |m| m.as_str());
        if name != end {
            return Err(format!("<{}> closed by </{}>", name, end));
        }
        let raw = caps.name("text").map_or("", |m| m.as_str());
        let text = unescape(raw).ok_or_else(|| format!("bad entity in '{}'", raw))?;
        return Ok(Node::Text { name, text });
    }

    if let Some(caps) = patterns.close.captures(line) {
        return Ok(Node::Close(caps.name("name").map_or("", |m| m.as_str())));
    }

    if let Some(caps) = patterns.open.captures(line) {
        let name = caps.name("name").map_or("", |m| m.as_str());
        let mut attrs = Vec::new();
        if let Some(list) = caps.name("attrs") {
            for attr in patterns.attr.captures_iter(list.as_str()) {
                let key = attr.name("key").map_or("", |m| m.as_str());
                let raw = attr.name("value").map_or("", |m| m.as_str());
                let value = unescape(raw).ok_or_else(|| format!("bad entity in '{}'", raw))?;
                attrs.push((key, value));
            }
        }
        return Ok(Node::Open {
            name,
            attrs,
            empty: caps.name("empty").is_some(),
        });
    }

    Err(format!("unrecognized line '{}'", line))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Start,
    Root,
    Metadata,
    Elements,
    Element,
    End,
}

#[derive(Default)]
struct XmlParser {
    document: UiStateDocument,
    state: State,
    current: Option<Element>,
    elements_seen: bool,
}

impl XmlParser {
    fn feed(&mut self, number: usize, node: Node<'_>) -> Result<(), ReadError> {
        let fail = |reason: String| ReadError::Xml {
            line: number,
            reason,
        };

        match (self.state, node) {
            (State::Start, Node::Prolog) => {}
            (State::Start, Node::Open { name: ROOT, attrs, empty }) => {
                let version = attr(&attrs, "version")
                    .ok_or_else(|| fail("missing version attribute".to_string()))?;
                if version != SCHEMA_VERSION {
                    return Err(ReadError::UnsupportedVersion(version.to_string()));
                }
                if empty {
                    return Err(fail("document has no <elements>".to_string()));
                }
                self.document.version = version.to_string();
                self.state = State::Root;
            }
            (State::Root, Node::Open { name: "metadata", empty, .. }) => {
                if !empty {
                    self.state = State::Metadata;
                }
            }
            (State::Metadata, Node::Text { name: "device-model", text }) => {
                self.document.metadata.device = Some(text);
            }
            (State::Metadata, Node::Open { name: "screen", attrs, empty: true }) => {
                self.document.metadata.screen = Some(Screen {
                    width: int_attr(&attrs, "width", number)?,
                    height: int_attr(&attrs, "height", number)?,
                    center: Position::new(
                        int_attr(&attrs, "center-x", number)?,
                        int_attr(&attrs, "center-y", number)?,
                    ),
                });
            }
            (State::Metadata, Node::Close("metadata")) => self.state = State::Root,
            (State::Root, Node::Open { name: "elements", empty, .. }) if !self.elements_seen => {
                self.elements_seen = true;
                if !empty {
                    self.state = State::Elements;
                }
            }
            (State::Elements, Node::Open { name: "element", attrs, empty }) => {
                let id = attr(&attrs, "id").ok_or_else(|| fail("element without id".to_string()))?;
                let kind = attr(&attrs, "type")
                    .ok_or_else(|| fail(format!("element {} without type", id)))?;
                let mut spec = ElementSpec::new(kind);
                spec.label = attr(&attrs, "label").map(str::to_string);
                let element = Element {
                    id: id.to_string(),
                    spec,
                };
                if empty {
                    self.document.elements.push(element);
                } else {
                    self.current = Some(element);
                    self.state = State::Element;
                }
            }
            (State::Element, Node::Open { name: "position", attrs, empty: true }) => {
                let position = Position::new(
                    int_attr(&attrs, "x", number)?,
                    int_attr(&attrs, "y", number)?,
                );
                self.current_spec(number)?.position = Some(position);
            }
            (State::Element, Node::Open { name: "size", attrs, empty: true }) => {
                let size = if attr(&attrs, "value").is_some() {
                    Size::Scalar(int_attr(&attrs, "value", number)?)
                } else {
                    Size::Dimensions {
                        width: int_attr(&attrs, "width", number)?,
                        height: int_attr(&attrs, "height", number)?,
                    }
                };
                self.current_spec(number)?.size = Some(size);
            }
            (State::Element, Node::Text { name: "fill-color", text }) => {
                let color = text.parse::<Rgb>().map_err(|_| ReadError::InvalidField {
                    id: self.current_id(),
                    field: "fill-color",
                    value: text.clone(),
                })?;
                self.current_spec(number)?.color = Some(color);
            }
            (State::Element, Node::Text { name: "font-size", text }) => {
                let dto = match text.parse::<u32>() {
                    Ok(points) => FontSizeDto::Points(points),
                    Err(_) => FontSizeDto::Tag(text),
                };
                self.current_spec(number)?.font = Some(FontSize::from(dto));
            }
            (State::Element, Node::Text { name: "text-content", text }) => {
                self.current_spec(number)?.text_content = Some(text);
            }
            (State::Element, Node::Close("element")) => {
                if let Some(element) = self.current.take() {
                    self.document.elements.push(element);
                }
                self.state = State::Elements;
            }
            (State::Elements, Node::Close("elements")) => self.state = State::Root,
            (State::Root, Node::Close(ROOT)) if self.elements_seen => self.state = State::End,
            (state, node) => {
                return Err(fail(format!("unexpected {:?} in {:?}", node, state)));
            }
        }
        Ok(())
    }

    fn current_spec(&mut self, number: usize) -> Result<&mut ElementSpec, ReadError> {
        self.current
            .as_mut()
            .map(|e| &mut e.spec)
            .ok_or_else(|| ReadError::Xml {
                line: number,
                reason: "field outside <element>".to_string(),
            })
    }

    fn current_id(&self) -> String {
        self.current
            .as_ref()
            .map(|e| e.id.clone())
            .unwrap_or_default()
    }
}

fn attr<'a>(attrs: &'a [(&str, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

fn int_attr<T: FromStr>(
    attrs: &[(&str, String)],
    key: &str,
    number: usize,
) -> Result<T, ReadError> {
    attr(attrs, key)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ReadError::Xml {
            line: number,
            reason: format!("attribute '{}' is missing or not an integer", key),
        })
}
