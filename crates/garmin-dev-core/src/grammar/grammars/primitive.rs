use crate::grammar::patterns::RenderCaptures;
use crate::grammar::traits::ElementGrammar;

/// Catch-all: any render line with a `Position` clause.
pub struct PrimitiveGrammar;

impl PrimitiveGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PrimitiveGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementGrammar for PrimitiveGrammar {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn accepts(&self, captures: &RenderCaptures<'_>) -> bool {
        captures.position.is_some()
    }
}
