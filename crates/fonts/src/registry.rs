use crate::asset::FontAsset;

/// Splits a word into the pieces a line breaker may place on separate lines.
pub type Hyphenator = fn(&str) -> Vec<String>;

/// Hyphenation is disabled for report fonts: automatic breaking mangles
/// words in the target script, so every word comes back whole.
pub fn no_hyphenation(word: &str) -> Vec<String> {
    vec![word.to_string()]
}

/// A font family registered with the renderer.
#[derive(Debug, Clone)]
pub struct RegisteredFamily {
    pub asset: FontAsset,
    pub hyphenate: Hyphenator,
}

impl RegisteredFamily {
    pub fn new(asset: FontAsset) -> Self {
        Self {
            asset,
            hyphenate: no_hyphenation,
        }
    }

    pub fn family(&self) -> &str {
        &self.asset.family
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::FontOrigin;

    #[test]
    fn test_hyphenation_returns_word_unchanged() {
        assert_eq!(no_hyphenation("মূল্যায়ন"), vec!["মূল্যায়ন".to_string()]);
        assert_eq!(no_hyphenation("extraordinarily"), vec!["extraordinarily".to_string()]);
    }

    #[test]
    fn test_registered_family_uses_no_hyphenation() {
        let family = RegisteredFamily::new(FontAsset::new(
            "Test",
            vec![1],
            vec![2],
            FontOrigin::Remote("https://x.test".to_string()),
        ));
        assert_eq!(family.family(), "Test");
        assert_eq!((family.hyphenate)("word"), vec!["word".to_string()]);
    }
}
