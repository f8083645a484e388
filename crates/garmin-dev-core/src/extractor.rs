//! Turns a classified line into a typed [`ElementSpec`].
//!
//! Numeric fields are integers. A token that does not parse makes the whole
//! line a [`MalformedPayload`]; the caller drops the line and moves on.

use crate::document::Screen;
use crate::element::{ElementSpec, FontSize, Position, Rgb, Size};
use crate::error::{Clause, MalformedPayload};
use crate::grammar::{ArgsRole, GrammarMatch, ScreenCaptures};
use crate::options::{NormalizePolicy, UnknownFontPolicy};

pub fn extract(
    matched: &GrammarMatch<'_>,
    policy: &NormalizePolicy,
) -> Result<ElementSpec, MalformedPayload> {
    let caps = &matched.captures;
    let grammar = matched.grammar;
    let malformed = |clause, token: &str| MalformedPayload::new(grammar, clause, token);

    let mut spec = ElementSpec::new(policy.normalize_kind(caps.kind));

    if let Some(args) = caps.args.map(clean_args).filter(|a| !a.is_empty()) {
        match matched.args_role {
            ArgsRole::Label => spec.label = Some(args.to_string()),
            ArgsRole::TextContent => spec.text_content = Some(args.to_string()),
        }
    }

    if let Some(raw) = caps.position {
        spec.position = Some(parse_position(raw).ok_or_else(|| malformed(Clause::Position, raw))?);
    }

    if let Some(raw) = caps.size {
        spec.size = Some(parse_size(raw).ok_or_else(|| malformed(Clause::Size, raw))?);
    }

    if let Some(raw) = caps.color {
        spec.color = Some(raw.parse::<Rgb>().map_err(|_| malformed(Clause::Color, raw))?);
    }

    if let Some(raw) = caps.font {
        if raw.trim().is_empty() {
            return Err(malformed(Clause::Font, raw));
        }
        let font = FontSize::from_tag(raw);
        if font.is_known() || policy.unknown_fonts == UnknownFontPolicy::Preserve {
            spec.font = Some(font);
        }
    }

    Ok(spec)
}

pub fn extract_screen(caps: &ScreenCaptures<'_>) -> Result<Screen, MalformedPayload> {
    let (width, height) = parse_pair(caps.dims)
        .ok_or_else(|| MalformedPayload::new("screen", Clause::Screen, caps.dims))?;
    let center = parse_position(caps.center)
        .ok_or_else(|| MalformedPayload::new("screen", Clause::Center, caps.center))?;

    Ok(Screen {
        width,
        height,
        center,
    })
}

fn clean_args(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

fn parse_position(raw: &str) -> Option<Position> {
    let (x, y) = raw.split_once(',')?;
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_pair(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn parse_size(raw: &str) -> Option<Size> {
    if raw.contains('x') {
        let (width, height) = parse_pair(raw)?;
        Some(Size::Dimensions { width, height })
    } else {
        raw.trim().parse().ok().map(Size::Scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::patterns::parse_render_line;
    use crate::grammar::parse_screen_line;
    use crate::options::KindStyle;

    fn matched(text: &str, args_role: ArgsRole) -> GrammarMatch<'_> {
        GrammarMatch {
            grammar: "test",
            args_role,
            captures: parse_render_line(text).unwrap(),
        }
    }

    fn extract_default(text: &str) -> Result<ElementSpec, MalformedPayload> {
        extract(&matched(text, ArgsRole::Label), &NormalizePolicy::default())
    }

    #[test]
    fn test_full_payload() {
        let spec = extract_default(
            "[W] RENDER: Hand(minute) Position(-3,140) Size(4x90) Color(0XAABBCC) Font(SMALL)",
        )
        .unwrap();

        assert_eq!(spec.kind, "hand");
        assert_eq!(spec.label.as_deref(), Some("minute"));
        assert_eq!(spec.position, Some(Position::new(-3, 140)));
        assert_eq!(spec.size, Some(Size::Dimensions { width: 4, height: 90 }));
        assert_eq!(spec.color.map(|c| c.to_string()).as_deref(), Some("#aabbcc"));
        assert_eq!(spec.font, Some(FontSize::Small));
    }

    #[test]
    fn test_absent_clauses_stay_absent() {
        let spec = extract_default("RENDER: Tick Position(1,2)").unwrap();
        assert_eq!(spec.label, None);
        assert_eq!(spec.size, None);
        assert_eq!(spec.color, None);
        assert_eq!(spec.font, None);
        assert_eq!(spec.text_content, None);
    }

    #[test]
    fn test_text_role_and_quoted_args() {
        let spec = extract(
            &matched(r#"RENDER: Title("Hello") Position(1,2) Font(MEDIUM)"#, ArgsRole::TextContent),
            &NormalizePolicy::default(),
        )
        .unwrap();
        assert_eq!(spec.text_content.as_deref(), Some("Hello"));
        assert_eq!(spec.label, None);
    }

    #[test]
    fn test_blank_args_are_absent() {
        let spec = extract_default("RENDER: Tick(  ) Position(1,2)").unwrap();
        assert_eq!(spec.label, None);
    }

    #[test]
    fn test_malformed_position() {
        let err = extract_default("RENDER: Tick Position(abc,2)").unwrap_err();
        assert_eq!(err.clause, Clause::Position);
        assert_eq!(err.token, "abc,2");
        assert_eq!(err.grammar, "test");

        assert!(extract_default("RENDER: Tick Position(12)").is_err());
        assert!(extract_default("RENDER: Tick Position(1,99999999999)").is_err());
    }

    #[test]
    fn test_malformed_size_and_color() {
        assert_eq!(
            extract_default("RENDER: Tick Position(1,2) Size(-4)").unwrap_err().clause,
            Clause::Size
        );
        assert_eq!(
            extract_default("RENDER: Tick Position(1,2) Color(0xZZZZZZ)").unwrap_err().clause,
            Clause::Color
        );
    }

    #[test]
    fn test_empty_font_is_malformed() {
        assert_eq!(
            extract_default("RENDER: Tick Position(1,2) Font()").unwrap_err().clause,
            Clause::Font
        );
    }

    #[test]
    fn test_unknown_font_policy() {
        let line = "RENDER: Tick Position(1,2) Font(NUMBER_HOT)";

        let kept = extract_default(line).unwrap();
        assert_eq!(kept.font, Some(FontSize::Other("NUMBER_HOT".to_string())));

        let policy = NormalizePolicy {
            unknown_fonts: UnknownFontPolicy::Drop,
            ..Default::default()
        };
        let dropped = extract(&matched(line, ArgsRole::Label), &policy).unwrap();
        assert_eq!(dropped.font, None);
    }

    #[test]
    fn test_kind_style_verbatim() {
        let policy = NormalizePolicy {
            kind_style: KindStyle::Verbatim,
            ..Default::default()
        };
        let spec = extract(&matched("RENDER: Hour_Number Position(1,2)", ArgsRole::Label), &policy)
            .unwrap();
        assert_eq!(spec.kind, "Hour_Number");
    }

    #[test]
    fn test_screen_descriptor() {
        let caps = parse_screen_line("RENDER: Screen(260x280) Center(130,140)").unwrap();
        let screen = extract_screen(&caps).unwrap();
        assert_eq!(screen.width, 260);
        assert_eq!(screen.height, 280);
        assert_eq!(screen.center, Position::new(130, 140));

        let bad = parse_screen_line("RENDER: Screen(wide) Center(130,140)").unwrap();
        assert_eq!(extract_screen(&bad).unwrap_err().clause, Clause::Screen);
    }
}
