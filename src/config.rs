//! Conversion options.

use feedback_pdf_fonts::FontConfig;
use feedback_pdf_theme::page::DEFAULT_FOOTER_LABEL;
use serde::Deserialize;

/// Environment variable overriding the footer label.
pub const FOOTER_LABEL_ENV: &str = "FEEDBACK_PDF_FOOTER_LABEL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub fonts: FontConfig,
    /// Static text at the left of every footer.
    pub footer_label: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            footer_label: DEFAULT_FOOTER_LABEL.to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn from_env() -> Self {
        let footer_label = std::env::var(FOOTER_LABEL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FOOTER_LABEL.to_string());
        Self {
            fonts: FontConfig::from_env(),
            footer_label,
        }
    }

    pub fn with_footer_label(mut self, label: impl Into<String>) -> Self {
        self.footer_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_footer_label() {
        assert_eq!(ConvertOptions::default().footer_label, "AI Feedback Report");
    }

    #[test]
    fn test_deserialize_nested_font_config() {
        let options: ConvertOptions = serde_json::from_str(
            r#"{ "footer_label": "Review", "fonts": { "base_url": "https://cdn.test" } }"#,
        )
        .unwrap();
        assert_eq!(options.footer_label, "Review");
        assert_eq!(options.fonts.resolve_base_url(), "https://cdn.test");
        assert_eq!(options.fonts.family, "Noto Sans");
    }
}
