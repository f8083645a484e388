use crate::grammar::patterns::RenderCaptures;
use crate::grammar::traits::ElementGrammar;

/// `RENDER: <Kind>[(<label>)] Position(x,y) Size(<r>) [Color(..)]`
pub struct CircleGrammar;

impl CircleGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CircleGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementGrammar for CircleGrammar {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn accepts(&self, captures: &RenderCaptures<'_>) -> bool {
        captures.position.is_some() && captures.has_scalar_size()
    }
}
