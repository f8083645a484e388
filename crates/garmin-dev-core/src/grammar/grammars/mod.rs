mod circle;
mod primitive;
mod rect;
mod text;

pub use circle::CircleGrammar;
pub use primitive::PrimitiveGrammar;
pub use rect::RectGrammar;
pub use text::TextGrammar;

/// Runs one grammar over a raw line the way the registry would.
#[cfg(test)]
pub(crate) fn try_match(
    grammar: &dyn super::ElementGrammar,
    line: &str,
    policy: &crate::options::NormalizePolicy,
) -> Option<Result<crate::element::ElementSpec, crate::error::MalformedPayload>> {
    let captures = super::parse_render_line(line)?;
    if !grammar.accepts(&captures) {
        return None;
    }

    let matched = super::GrammarMatch {
        grammar: grammar.name(),
        args_role: grammar.args_role(),
        captures,
    };
    Some(crate::extractor::extract(&matched, policy))
}
