use super::patterns::RenderCaptures;

/// Where a grammar puts the parenthesised argument of the element head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgsRole {
    /// Disambiguating sub-identifier (`JailbotEye(LEFT)`).
    Label,
    /// Literal text to render (`HourNumber(12)`).
    TextContent,
}

/// One recognized shape of render line.
///
/// New element families are supported by appending a grammar to the
/// registry, not by editing a central conditional.
pub trait ElementGrammar: Send + Sync {
    fn name(&self) -> &'static str;

    /// True when every clause this grammar requires is present.
    fn accepts(&self, captures: &RenderCaptures<'_>) -> bool;

    fn args_role(&self) -> ArgsRole {
        ArgsRole::Label
    }
}
