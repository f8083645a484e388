use super::grammars::{CircleGrammar, PrimitiveGrammar, RectGrammar, TextGrammar};
use super::patterns::parse_render_line;
use super::traits::ElementGrammar;
use super::{Classification, GrammarMatch, LogLine};

/// Ordered list of element grammars. Earlier entries win.
pub struct GrammarRegistry {
    grammars: Vec<Box<dyn ElementGrammar>>,
}

impl GrammarRegistry {
    pub fn empty() -> Self {
        Self {
            grammars: Vec::new(),
        }
    }

    /// `text`, `circle`, `rect`, then the `primitive` catch-all.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.push(Box::new(TextGrammar::new()));
        registry.push(Box::new(CircleGrammar::new()));
        registry.push(Box::new(RectGrammar::new()));
        registry.push(Box::new(PrimitiveGrammar::new()));
        registry
    }

    /// Append a grammar at the lowest priority.
    pub fn push(&mut self, grammar: Box<dyn ElementGrammar>) {
        self.grammars.push(grammar);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.grammars.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    pub fn classify<'l>(&self, line: &LogLine<'l>) -> Classification<'l> {
        let Some(captures) = parse_render_line(line.text) else {
            return Classification::NoMatch;
        };

        match self.grammars.iter().find(|g| g.accepts(&captures)) {
            Some(grammar) => Classification::Matched(GrammarMatch {
                grammar: grammar.name(),
                args_role: grammar.args_role(),
                captures,
            }),
            None => Classification::NoMatch,
        }
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::patterns::RenderCaptures;

    fn classify(text: &str) -> Option<&'static str> {
        GrammarRegistry::with_defaults()
            .classify(&LogLine::new(1, text))
            .grammar()
    }

    #[test]
    fn test_default_priority_order() {
        let registry = GrammarRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["text", "circle", "rect", "primitive"]);
    }

    #[test]
    fn test_text_line() {
        assert_eq!(
            classify("[W] RENDER: HourNumber(12) Position(130,30) Font(LARGE) Color(0xFFFFFF)"),
            Some("text")
        );
    }

    #[test]
    fn test_circle_line() {
        assert_eq!(
            classify("[W] RENDER: CenterDot(hub) Position(130,130) Size(6) Color(0xFF0000)"),
            Some("circle")
        );
    }

    #[test]
    fn test_rect_line() {
        assert_eq!(
            classify("[W] RENDER: JailbotEye(LEFT) Position(110,125) Size(8x3) Color(0x00ff00)"),
            Some("rect")
        );
    }

    #[test]
    fn test_primitive_catch_all() {
        assert_eq!(classify("[W] RENDER: Background Position(0,0)"), Some("primitive"));
    }

    #[test]
    fn test_missing_position_is_no_match() {
        assert_eq!(classify("[W] RENDER: Background Color(0x000000)"), None);
        assert_eq!(classify("[W] RENDER: Screen(260x260) Center(130,130)"), None);
    }

    #[test]
    fn test_non_render_categories_are_no_match() {
        assert_eq!(classify("[W] STATE: Mode(ACTIVE) Position(1,2)"), None);
        assert_eq!(classify("[W] DEBUG: Position(1,2) Color(0xffffff)"), None);
        assert_eq!(classify("[W] INFO: started"), None);
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = GrammarRegistry::empty();
        assert!(registry.is_empty());
        let class = registry.classify(&LogLine::new(1, "RENDER: Dot Position(1,2)"));
        assert_eq!(class, Classification::NoMatch);
    }

    struct ColorOnlyGrammar;

    impl ElementGrammar for ColorOnlyGrammar {
        fn name(&self) -> &'static str {
            "fill"
        }

        fn accepts(&self, captures: &RenderCaptures<'_>) -> bool {
            captures.color.is_some()
        }
    }

    #[test]
    fn test_appended_grammar_extends_recognition() {
        let mut registry = GrammarRegistry::with_defaults();
        registry.push(Box::new(ColorOnlyGrammar));

        let line = LogLine::new(1, "[W] RENDER: Background Color(0x000000)");
        assert_eq!(registry.classify(&line).grammar(), Some("fill"));

        let positioned = LogLine::new(2, "[W] RENDER: Background Position(0,0) Color(0x000000)");
        assert_eq!(registry.classify(&positioned).grammar(), Some("primitive"));
    }
}
