//! Faces used to set report text and the width measurement line breaking needs.

use crate::error::RenderError;
use feedback_pdf_fonts::{Hyphenator, RegisteredFamily, SharedFontData, no_hyphenation};
use feedback_pdf_theme::FontWeight;
use feedback_pdf_theme::blocks::MONO_ADVANCE;
use rustybuzz::ttf_parser::GlyphId;
use std::collections::HashMap;
use std::sync::Arc;

/// Which face a run of text is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Regular,
    Bold,
    /// Standard Helvetica-Oblique; the regular file of an embedded family.
    Italic,
    /// Text for code. Standard Courier with the standard faces; the embedded
    /// regular face otherwise, since Courier only covers Latin text.
    Mono,
}

impl From<FontWeight> for FaceKind {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => FaceKind::Regular,
            FontWeight::Bold => FaceKind::Bold,
        }
    }
}

/// Horizontal advances of one embedded face, read once from its `cmap`.
///
/// Text is written glyph by glyph without kerning, so summing per-character
/// advances gives the drawn width.
#[derive(Debug, Clone)]
struct FaceMetrics {
    units_per_em: f32,
    advances: Arc<HashMap<char, u16>>,
    /// Advance of `.notdef`, drawn for characters the face lacks.
    missing: u16,
}

impl FaceMetrics {
    fn parse(data: &[u8], label: &str, family: &str) -> Result<Self, RenderError> {
        let face = rustybuzz::Face::from_slice(data, 0).ok_or_else(|| {
            RenderError::Font(format!("{} face of '{}' is not a valid font file", label, family))
        })?;

        let mut advances = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if let (Some(ch), Some(glyph)) = (char::from_u32(cp), subtable.glyph_index(cp))
                        && let Some(advance) = face.glyph_hor_advance(glyph)
                    {
                        advances.entry(ch).or_insert(advance);
                    }
                });
            }
        }
        log::debug!("Read {} glyph advances from {} face of '{}'", advances.len(), label, family);

        Ok(Self {
            units_per_em: face.units_per_em() as f32,
            missing: face.glyph_hor_advance(GlyphId(0)).unwrap_or(0),
            advances: Arc::new(advances),
        })
    }

    fn width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.advances.get(&c).copied().unwrap_or(self.missing)))
            .sum();
        units as f32 * size / self.units_per_em
    }
}

#[derive(Clone)]
enum Faces {
    /// The provisioned family, embedded into every document.
    Embedded {
        regular: SharedFontData,
        bold: SharedFontData,
        regular_metrics: FaceMetrics,
        bold_metrics: FaceMetrics,
    },
    /// PDF standard Helvetica; nothing is embedded.
    Standard,
}

#[derive(Clone)]
pub struct Typeface {
    family: String,
    faces: Faces,
    hyphenate: Hyphenator,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("family", &self.family)
            .field("embedded", &self.is_embedded())
            .finish()
    }
}

impl Typeface {
    /// Uses the registered family's regular and bold files.
    ///
    /// Both faces are parsed here, once, so a corrupt file fails before any
    /// layout work happens and measuring never re-parses.
    pub fn from_family(family: &RegisteredFamily) -> Result<Self, RenderError> {
        let regular_metrics = FaceMetrics::parse(&family.asset.regular, "regular", family.family())?;
        let bold_metrics = FaceMetrics::parse(&family.asset.bold, "bold", family.family())?;
        Ok(Self {
            family: family.family().to_string(),
            faces: Faces::Embedded {
                regular: family.asset.regular.clone(),
                bold: family.asset.bold.clone(),
                regular_metrics,
                bold_metrics,
            },
            hyphenate: family.hyphenate,
        })
    }

    /// Standard Helvetica. Only suitable for Latin text.
    pub fn standard() -> Self {
        Self {
            family: "Helvetica".to_string(),
            faces: Faces::Standard,
            hyphenate: no_hyphenation,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.faces, Faces::Embedded { .. })
    }

    /// Raw font file for an embedded face; `None` for standard fonts.
    ///
    /// Italic and mono share the regular file when the family is embedded.
    pub fn font_data(&self, kind: FaceKind) -> Option<&[u8]> {
        match (&self.faces, kind) {
            (Faces::Embedded { regular, .. }, FaceKind::Regular | FaceKind::Italic | FaceKind::Mono) => {
                Some(regular.as_slice())
            }
            (Faces::Embedded { bold, .. }, FaceKind::Bold) => Some(bold.as_slice()),
            (Faces::Standard, _) => None,
        }
    }

    /// Break opportunities inside a single word.
    pub fn hyphenate(&self, word: &str) -> Vec<String> {
        (self.hyphenate)(word)
    }

    /// Advance width of `text` set at `size` points.
    pub fn measure(&self, text: &str, kind: FaceKind, size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match (&self.faces, kind) {
            (
                Faces::Embedded {
                    regular_metrics, ..
                },
                FaceKind::Regular | FaceKind::Italic | FaceKind::Mono,
            ) => regular_metrics.width(text, size),
            (Faces::Embedded { bold_metrics, .. }, FaceKind::Bold) => bold_metrics.width(text, size),
            (Faces::Standard, FaceKind::Mono) => text.chars().count() as f32 * MONO_ADVANCE * size,
            (Faces::Standard, _) => approximate_width(text, kind, size),
        }
    }
}

/// Coarse Helvetica metrics by character class, in em.
fn approximate_width(text: &str, kind: FaceKind, size: f32) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.278,
            'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.333,
            'm' | 'M' | 'W' => 0.833,
            'w' => 0.722,
            '0'..='9' => 0.556,
            c if c.is_ascii_uppercase() => 0.667,
            _ => 0.52,
        })
        .sum();
    let weight = if kind == FaceKind::Bold { 1.06 } else { 1.0 };
    em * weight * size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        CYRILLIC_PE_ADVANCE, LATIN_A_ADVANCE, NOTDEF_ADVANCE, UNITS_PER_EM, tiny_family,
    };
    use feedback_pdf_fonts::{FontAsset, FontOrigin};

    #[test]
    fn test_mono_width_is_fixed_pitch() {
        let face = Typeface::standard();
        let size = 10.0;
        assert!((face.measure("iiii", FaceKind::Mono, size) - 24.0).abs() < 1e-4);
        assert_eq!(
            face.measure("iiii", FaceKind::Mono, size),
            face.measure("MMMM", FaceKind::Mono, size)
        );
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let face = Typeface::standard();
        let text = "Feedback summary";
        assert!(face.measure(text, FaceKind::Bold, 12.0) > face.measure(text, FaceKind::Regular, 12.0));
    }

    #[test]
    fn test_width_scales_with_size() {
        let face = Typeface::standard();
        let small = face.measure("Hello", FaceKind::Regular, 10.0);
        let large = face.measure("Hello", FaceKind::Regular, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
        assert_eq!(face.measure("", FaceKind::Regular, 10.0), 0.0);
    }

    #[test]
    fn test_invalid_family_bytes_are_rejected() {
        let family = RegisteredFamily::new(FontAsset::new(
            "Broken",
            b"not a font".to_vec(),
            b"also not a font".to_vec(),
            FontOrigin::Remote("https://fonts.test".to_string()),
        ));
        let err = Typeface::from_family(&family).unwrap_err();
        assert!(matches!(err, RenderError::Font(msg) if msg.contains("regular")));
    }

    #[test]
    fn test_embedded_width_sums_glyph_advances() {
        let face = Typeface::from_family(&tiny_family()).unwrap();
        assert!(face.is_embedded());
        let expected = (2.0 * LATIN_A_ADVANCE as f32 + CYRILLIC_PE_ADVANCE as f32) * 10.0
            / UNITS_PER_EM as f32;
        assert!((face.measure("AAп", FaceKind::Regular, 10.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_unmapped_characters_use_notdef_advance() {
        let face = Typeface::from_family(&tiny_family()).unwrap();
        let expected = NOTDEF_ADVANCE as f32 * 12.0 / UNITS_PER_EM as f32;
        assert!((face.measure("z", FaceKind::Bold, 12.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_embedded_mono_uses_regular_face() {
        let face = Typeface::from_family(&tiny_family()).unwrap();
        assert_eq!(face.font_data(FaceKind::Mono), face.font_data(FaceKind::Regular));
        assert_eq!(
            face.measure("пп", FaceKind::Mono, 9.0),
            face.measure("пп", FaceKind::Regular, 9.0)
        );
        assert!(Typeface::standard().font_data(FaceKind::Mono).is_none());
    }

    #[test]
    fn test_standard_face_keeps_words_whole() {
        let face = Typeface::standard();
        assert!(!face.is_embedded());
        assert_eq!(face.hyphenate("assessment"), vec!["assessment".to_string()]);
    }
}
