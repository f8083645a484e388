//! Textual shapes of firmware debug-log lines.
//!
//! A render line looks like
//! `[Tag] RENDER: <Kind>(<args>) Position(<x>,<y>) Size(<dims>) Color(<hex>) Font(<tag>)`
//! where the source tag, the argument list and every clause after the head
//! are optional. Any text may precede the tag, such as a timestamp or
//! further tags; the tag is the bracket closest to the category marker.
//! Keywords are case-sensitive. Clauses may come in any order; the first
//! occurrence of a clause wins.

use regex::Regex;
use std::sync::OnceLock;

struct LinePatterns {
    render_head: Regex,
    clause: Regex,
    screen: Regex,
    category: Regex,
}

fn get_patterns() -> &'static LinePatterns {
    static PATTERNS: OnceLock<LinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| LinePatterns {
        render_head: Regex::new(
            r"^(?:.*?\[(?P<tag>[^\]]*)\]\s*|\s*)RENDER:\s*(?P<kind>[A-Za-z][A-Za-z0-9_\-]*)(?:\((?P<args>[^)]*)\))?(?P<rest>.*)$",
        )
        .unwrap(),

        clause: Regex::new(r"\b(?P<name>Position|Size|Color|Font)\((?P<value>[^)]*)\)").unwrap(),

        screen: Regex::new(
            r"^(?:.*?\[[^\]]*\]\s*|\s*)RENDER:\s*Screen\((?P<dims>[^)]*)\)\s+Center\((?P<center>[^)]*)\)",
        )
        .unwrap(),

        category: Regex::new(
            r"^(?:.*?\[[^\]]*\]\s*|\s*)(?P<category>[A-Z][A-Z_]*):(?:\s|$)",
        )
        .unwrap(),
    })
}

/// Raw captures of a `RENDER:` element line. Values are untrimmed slices of
/// the source text; nothing has been parsed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCaptures<'l> {
    pub source_tag: Option<&'l str>,
    pub kind: &'l str,
    pub args: Option<&'l str>,
    pub position: Option<&'l str>,
    pub size: Option<&'l str>,
    pub color: Option<&'l str>,
    pub font: Option<&'l str>,
}

impl RenderCaptures<'_> {
    /// A `Size(...)` clause without an `x` separator carries a single scalar.
    pub fn has_scalar_size(&self) -> bool {
        self.size.is_some_and(|s| !s.contains('x'))
    }

    pub fn has_pair_size(&self) -> bool {
        self.size.is_some_and(|s| s.contains('x'))
    }
}

/// Raw captures of the `RENDER: Screen(<w>x<h>) Center(<x>,<y>)` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCaptures<'l> {
    pub dims: &'l str,
    pub center: &'l str,
}

pub fn parse_render_line(text: &str) -> Option<RenderCaptures<'_>> {
    let patterns = get_patterns();
    let head = patterns.render_head.captures(text)?;

    let mut caps = RenderCaptures {
        source_tag: head.name("tag").map(|m| m.as_str()),
        kind: head.name("kind")?.as_str(),
        args: head.name("args").map(|m| m.as_str()),
        ..Default::default()
    };

    let rest = head.name("rest").map(|m| m.as_str()).unwrap_or("");
    for clause in patterns.clause.captures_iter(rest) {
        let (Some(name), Some(value)) = (clause.name("name"), clause.name("value")) else {
            continue;
        };
        let slot = match name.as_str() {
            "Position" => &mut caps.position,
            "Size" => &mut caps.size,
            "Color" => &mut caps.color,
            "Font" => &mut caps.font,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.as_str());
        }
    }

    Some(caps)
}

pub fn parse_screen_line(text: &str) -> Option<ScreenCaptures<'_>> {
    let caps = get_patterns().screen.captures(text)?;
    Some(ScreenCaptures {
        dims: caps.name("dims")?.as_str(),
        center: caps.name("center")?.as_str(),
    })
}

/// Severity/category marker of a log line (`RENDER`, `STATE`, `DEBUG`, ...).
pub fn line_category(text: &str) -> Option<&str> {
    get_patterns()
        .category
        .captures(text)
        .and_then(|c| c.name("category"))
        .map(|m| m.as_str())
}
