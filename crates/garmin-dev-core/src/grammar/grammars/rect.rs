use crate::grammar::patterns::RenderCaptures;
use crate::grammar::traits::ElementGrammar;

/// `RENDER: <Kind>[(<label>)] Position(x,y) Size(<w>x<h>) [Color(..)]`
pub struct RectGrammar;

impl RectGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RectGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementGrammar for RectGrammar {
    fn name(&self) -> &'static str {
        "rect"
    }

    fn accepts(&self, captures: &RenderCaptures<'_>) -> bool {
        captures.position.is_some() && captures.has_pair_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Position, Rgb, Size};
    use crate::grammar::grammars::try_match;
    use crate::options::NormalizePolicy;

    #[test]
    fn test_rect_grammar_jailbot_eye() {
        let line = "RENDER: JailbotEye(LEFT) Position(110,125) Size(8x3) Color(0x00ff00)";
        let spec = try_match(&RectGrammar::new(), line, &NormalizePolicy::default())
            .unwrap()
            .unwrap();

        assert_eq!(spec.kind, "jailboteye");
        assert_eq!(spec.label.as_deref(), Some("LEFT"));
        assert_eq!(spec.position, Some(Position::new(110, 125)));
        assert_eq!(spec.size, Some(Size::Dimensions { width: 8, height: 3 }));
        assert_eq!(spec.color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(spec.color.unwrap().to_string(), "#00ff00");
    }

    #[test]
    fn test_rect_grammar_bad_dimension_is_malformed() {
        let line = "RENDER: Bar Position(1,2) Size(8xZ)";
        let result = try_match(&RectGrammar::new(), line, &NormalizePolicy::default())
            .unwrap();
        assert!(result.is_err());
    }
}
