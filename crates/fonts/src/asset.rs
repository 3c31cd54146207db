use crate::error::FontError;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared font file bytes.
pub type SharedFontData = Arc<Vec<u8>>;

/// Where a resolved font family was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    /// Bundled files in the configured local directory.
    Local(PathBuf),
    /// Files cached in the temp directory by an earlier fetch.
    Cache(PathBuf),
    /// Fetched from this base origin.
    Remote(String),
}

/// A font family resolved to the bytes of its regular and bold weights.
#[derive(Clone)]
pub struct FontAsset {
    pub family: String,
    pub regular: SharedFontData,
    pub bold: SharedFontData,
    pub origin: FontOrigin,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("family", &self.family)
            .field("regular_len", &self.regular.len())
            .field("bold_len", &self.bold.len())
            .field("origin", &self.origin)
            .finish()
    }
}

impl FontAsset {
    pub fn new(family: impl Into<String>, regular: Vec<u8>, bold: Vec<u8>, origin: FontOrigin) -> Self {
        Self {
            family: family.into(),
            regular: Arc::new(regular),
            bold: Arc::new(bold),
            origin,
        }
    }
}

/// Checks that `data` parses as a TrueType or OpenType face.
///
/// `location` names where the bytes came from and is only used in the error.
pub fn validate_font(data: &[u8], location: &str) -> Result<(), FontError> {
    ttf_parser::Face::parse(data, 0)
        .map(|_| ())
        .map_err(|e| FontError::InvalidFont {
            location: location.to_string(),
            message: e.to_string(),
        })
}

/// Smallest face `ttf_parser` accepts: `head`, `hhea` and `maxp` only.
/// `units_per_em` makes faces distinguishable in assertions.
#[cfg(test)]
pub(crate) fn minimal_font(units_per_em: u16) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&units_per_em.to_be_bytes());
    let hhea = vec![0u8; 36];
    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    maxp.extend_from_slice(&1u16.to_be_bytes());

    let tables: [(&[u8; 4], &[u8]); 3] = [(b"head", &head), (b"hhea", &hhea), (b"maxp", &maxp)];
    let mut font = Vec::new();
    font.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    font.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    font.extend_from_slice(&[0u8; 6]);
    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        font.extend_from_slice(&0u32.to_be_bytes());
        font.extend_from_slice(&offset.to_be_bytes());
        font.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += data.len() as u32;
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
    }
    font
}
