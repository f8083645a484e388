//! Line classification.
//!
//! A [`GrammarRegistry`] holds an ordered list of [`ElementGrammar`]s. A line
//! is offered to each grammar in priority order and the first grammar whose
//! required clauses are all present claims it. Lines that are not render
//! payloads (`STATE:`, `DEBUG:`, `INFO:`, ...) never match.

mod grammars;
pub mod patterns;
mod registry;
mod traits;

pub use grammars::{CircleGrammar, PrimitiveGrammar, RectGrammar, TextGrammar};
pub use patterns::{
    line_category, parse_render_line, parse_screen_line, RenderCaptures, ScreenCaptures,
};
pub use registry::GrammarRegistry;
pub use traits::{ArgsRole, ElementGrammar};

/// One raw line of debug-log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'l> {
    /// 1-based line number in the source.
    pub number: usize,
    pub text: &'l str,
}

impl<'l> LogLine<'l> {
    pub fn new(number: usize, text: &'l str) -> Self {
        Self { number, text }
    }
}

/// A line claimed by a grammar, with the grammar's captured groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch<'l> {
    pub grammar: &'static str,
    pub args_role: ArgsRole,
    pub captures: RenderCaptures<'l>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'l> {
    NoMatch,
    Matched(GrammarMatch<'l>),
}

impl Classification<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched(_))
    }

    pub fn grammar(&self) -> Option<&'static str> {
        match self {
            Classification::Matched(m) => Some(m.grammar),
            Classification::NoMatch => None,
        }
    }
}
