use std::fmt::Write;

use super::Serializer;
use crate::document::{Element, Metadata, UiStateDocument};
use crate::element::Size;
use crate::error::EngineError;

pub(crate) const ROOT: &str = "garmin-ui-state";
const INDENT: &str = "  ";

/// Canonical XML form, two-space indented, one node per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for XmlSerializer {
    fn format_name(&self) -> &'static str {
        "xml"
    }

    fn serialize(&self, document: &UiStateDocument) -> Result<Vec<u8>, EngineError> {
        Ok(render(document).into_bytes())
    }
}

fn render(document: &UiStateDocument) -> String {
    let mut out = String::with_capacity(128 + document.len() * 160);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    line(&mut out, 0, format_args!("<{} version=\"{}\">", ROOT, escape(&document.version)));

    if !document.metadata.is_empty() {
        write_metadata(&mut out, &document.metadata);
    }

    if document.elements.is_empty() {
        line(&mut out, 1, format_args!("<elements/>"));
    } else {
        line(&mut out, 1, format_args!("<elements>"));
        for element in &document.elements {
            write_element(&mut out, element);
        }
        line(&mut out, 1, format_args!("</elements>"));
    }

    line(&mut out, 0, format_args!("</{}>", ROOT));
    out
}

fn write_metadata(out: &mut String, metadata: &Metadata) {
    line(out, 1, format_args!("<metadata>"));
    if let Some(device) = &metadata.device {
        line(out, 2, format_args!("<device-model>{}</device-model>", escape(device)));
    }
    if let Some(screen) = &metadata.screen {
        line(
            out,
            2,
            format_args!(
                "<screen width=\"{}\" height=\"{}\" center-x=\"{}\" center-y=\"{}\"/>",
                screen.width, screen.height, screen.center.x, screen.center.y
            ),
        );
    }
    line(out, 1, format_args!("</metadata>"));
}

fn write_element(out: &mut String, element: &Element) {
    let spec = &element.spec;
    let mut open = format!(
        "<element id=\"{}\" type=\"{}\"",
        escape(&element.id),
        escape(&spec.kind)
    );
    if let Some(label) = &spec.label {
        let _ = write!(open, " label=\"{}\"", escape(label));
    }

    let mut children = Vec::new();
    if let Some(p) = spec.position {
        children.push(format!("<position x=\"{}\" y=\"{}\"/>", p.x, p.y));
    }
    match spec.size {
        Some(Size::Scalar(value)) => children.push(format!("<size value=\"{}\"/>", value)),
        Some(Size::Dimensions { width, height }) => {
            children.push(format!("<size width=\"{}\" height=\"{}\"/>", width, height))
        }
        None => {}
    }
    if let Some(color) = spec.color {
        children.push(format!("<fill-color>{}</fill-color>", color));
    }
    if let Some(font) = &spec.font {
        children.push(format!("<font-size>{}</font-size>", escape(&font.to_string())));
    }
    if let Some(text) = &spec.text_content {
        children.push(format!("<text-content>{}</text-content>", escape(text)));
    }

    if children.is_empty() {
        line(out, 2, format_args!("{}/>", open));
        return;
    }
    line(out, 2, format_args!("{}>", open));
    for child in &children {
        line(out, 3, format_args!("{}", child));
    }
    line(out, 2, format_args!("</element>"));
}

fn line(out: &mut String, depth: usize, content: std::fmt::Arguments<'_>) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    let _ = out.write_fmt(content);
    out.push('\n');
}

/// Escape text for use in both attribute values and character data.
///
/// Line breaks become character references so every node stays on one line.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape`]; also accepts numeric character references.
/// Returns `None` on an unterminated or unknown entity.
pub(crate) fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let end = tail.find(';')?;
        let entity = &tail[..end];
        let decoded = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()?
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse().ok()?
                } else {
                    return None;
                };
                char::from_u32(code)?
            }
        };
        out.push(decoded);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}
