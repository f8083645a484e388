use crate::grammar::patterns::RenderCaptures;
use crate::grammar::traits::{ArgsRole, ElementGrammar};

/// `RENDER: <Kind>(<text>) Position(x,y) Font(<tag>) [Color(..)]`
///
/// The head argument is the literal text that was drawn.
pub struct TextGrammar;

impl TextGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementGrammar for TextGrammar {
    fn name(&self) -> &'static str {
        "text"
    }

    fn accepts(&self, captures: &RenderCaptures<'_>) -> bool {
        captures.args.is_some() && captures.position.is_some() && captures.font.is_some()
    }

    fn args_role(&self) -> ArgsRole {
        ArgsRole::TextContent
    }
}
