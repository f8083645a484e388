/// How element-type tokens are turned into kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindStyle {
    /// Lower-case and drop `_`, `-` and spaces: `HourNumber` and
    /// `hour_number` both become `hournumber`.
    #[default]
    Collapsed,
    /// Keep the token exactly as logged.
    Verbatim,
}

/// What to do with a font tag outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFontPolicy {
    #[default]
    Preserve,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizePolicy {
    pub kind_style: KindStyle,
    pub unknown_fonts: UnknownFontPolicy,
}

impl NormalizePolicy {
    pub fn normalize_kind(&self, token: &str) -> String {
        match self.kind_style {
            KindStyle::Collapsed => token
                .chars()
                .filter(|c| !matches!(c, '_' | '-' | ' '))
                .flat_map(char::to_lowercase)
                .collect(),
            KindStyle::Verbatim => token.to_string(),
        }
    }
}

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub policy: NormalizePolicy,
    /// Target device model recorded in the document metadata.
    pub device: Option<String>,
}

impl ExtractOptions {
    pub fn with_policy(mut self, policy: NormalizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_kind_merges_naming_variants() {
        let policy = NormalizePolicy::default();
        assert_eq!(policy.normalize_kind("HourNumber"), "hournumber");
        assert_eq!(policy.normalize_kind("hour_number"), "hournumber");
        assert_eq!(policy.normalize_kind("Hour-Number"), "hournumber");
        assert_eq!(policy.normalize_kind("JailbotEye"), "jailboteye");
    }

    #[test]
    fn test_verbatim_kind_untouched() {
        let policy = NormalizePolicy {
            kind_style: KindStyle::Verbatim,
            ..Default::default()
        };
        assert_eq!(policy.normalize_kind("HourNumber"), "HourNumber");
    }

    #[test]
    fn test_builder_pattern() {
        let options = ExtractOptions::default()
            .with_device("fr965")
            .with_policy(NormalizePolicy {
                unknown_fonts: UnknownFontPolicy::Drop,
                ..Default::default()
            });

        assert_eq!(options.device.as_deref(), Some("fr965"));
        assert_eq!(options.policy.unknown_fonts, UnknownFontPolicy::Drop);
        assert_eq!(options.policy.kind_style, KindStyle::Collapsed);
    }
}
