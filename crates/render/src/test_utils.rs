//! Font bytes for tests that need an embedded family without system fonts.

use feedback_pdf_fonts::{FontAsset, FontOrigin, RegisteredFamily};

pub(crate) const UNITS_PER_EM: u16 = 1000;
pub(crate) const NOTDEF_ADVANCE: u16 = 250;
pub(crate) const LATIN_A_ADVANCE: u16 = 600;
pub(crate) const CYRILLIC_PE_ADVANCE: u16 = 500;

/// A face mapping `A` and `п` through a format 12 `cmap`, with advances in
/// `hmtx`. Enough for `ttf_parser` and `rustybuzz`; not enough to draw.
pub(crate) fn tiny_font() -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&UNITS_PER_EM.to_be_bytes());

    let mut hhea = vec![0u8; 36];
    hhea[34..36].copy_from_slice(&3u16.to_be_bytes());

    let mut maxp = Vec::new();
    maxp.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    maxp.extend_from_slice(&3u16.to_be_bytes());

    let mut hmtx = Vec::new();
    for advance in [NOTDEF_ADVANCE, LATIN_A_ADVANCE, CYRILLIC_PE_ADVANCE] {
        hmtx.extend_from_slice(&advance.to_be_bytes());
        hmtx.extend_from_slice(&0i16.to_be_bytes());
    }

    let groups: [(u32, u32); 2] = [('A' as u32, 1), ('п' as u32, 2)];
    let mut cmap = Vec::new();
    cmap.extend_from_slice(&0u16.to_be_bytes());
    cmap.extend_from_slice(&1u16.to_be_bytes());
    cmap.extend_from_slice(&0u16.to_be_bytes()); // Unicode platform
    cmap.extend_from_slice(&4u16.to_be_bytes()); // full repertoire
    cmap.extend_from_slice(&12u32.to_be_bytes());
    cmap.extend_from_slice(&12u16.to_be_bytes());
    cmap.extend_from_slice(&0u16.to_be_bytes());
    cmap.extend_from_slice(&(16 + 12 * groups.len() as u32).to_be_bytes());
    cmap.extend_from_slice(&0u32.to_be_bytes());
    cmap.extend_from_slice(&(groups.len() as u32).to_be_bytes());
    for (code, glyph) in groups {
        cmap.extend_from_slice(&code.to_be_bytes());
        cmap.extend_from_slice(&code.to_be_bytes());
        cmap.extend_from_slice(&glyph.to_be_bytes());
    }

    let tables: [(&[u8; 4], &[u8]); 5] = [
        (b"cmap", &cmap),
        (b"head", &head),
        (b"hhea", &hhea),
        (b"hmtx", &hmtx),
        (b"maxp", &maxp),
    ];
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

pub(crate) fn tiny_family() -> RegisteredFamily {
    RegisteredFamily::new(FontAsset::new(
        "Tiny",
        tiny_font(),
        tiny_font(),
        FontOrigin::Remote("https://fonts.test".to_string()),
    ))
}
