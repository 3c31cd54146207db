//! Style constants for every block kind a report can contain.
//!
//! These values are fixed; reports are not themeable.

use crate::color::{self, Color};
use crate::text::{Border, FontWeight, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingStyle {
    pub text: TextStyle,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub border_bottom: Option<Border>,
}

const HEADING_STYLES: [HeadingStyle; 4] = [
    HeadingStyle {
        text: TextStyle::new(20.0, FontWeight::Bold, color::BLACK, 1.3),
        margin_top: 18.0,
        margin_bottom: 10.0,
        border_bottom: Some(Border::new(2.0, color::ACCENT)),
    },
    HeadingStyle {
        text: TextStyle::new(16.0, FontWeight::Bold, color::BLACK, 1.3),
        margin_top: 16.0,
        margin_bottom: 8.0,
        border_bottom: Some(Border::new(0.75, color::BORDER_LIGHT)),
    },
    HeadingStyle {
        text: TextStyle::new(13.5, FontWeight::Bold, color::TEXT, 1.3),
        margin_top: 12.0,
        margin_bottom: 6.0,
        border_bottom: None,
    },
    HeadingStyle {
        text: TextStyle::new(11.5, FontWeight::Bold, color::TEXT, 1.3),
        margin_top: 10.0,
        margin_bottom: 4.0,
        border_bottom: None,
    },
];

/// Style for a heading of the given depth.
///
/// Depths 5 and 6 share the depth-4 style; out-of-range depths clamp to 1..=4.
pub fn heading_style(depth: u8) -> &'static HeadingStyle {
    let index = depth.clamp(1, 4) as usize - 1;
    &HEADING_STYLES[index]
}

pub const PARAGRAPH: TextStyle = TextStyle::new(10.5, FontWeight::Regular, color::TEXT, 1.6);
pub const PARAGRAPH_SPACING: f32 = 6.0;

pub const LIST_MARKER_WIDTH: f32 = 18.0;
pub const LIST_ITEM_GAP: f32 = 3.0;
pub const LIST_SPACING: f32 = 6.0;
pub const BULLET: &str = "\u{2022}";

pub const CODE: TextStyle = TextStyle::new(9.0, FontWeight::Regular, color::CODE_TEXT, 1.4);
pub const CODE_PADDING: f32 = 8.0;
pub const CODE_BORDER: Border = Border::new(1.0, color::BORDER_LIGHT);
pub const CODE_BACKGROUND: Color = color::CODE_BACKGROUND;
pub const CODE_SPACING: f32 = 8.0;
/// Advance of one monospace glyph, as a fraction of the font size.
pub const MONO_ADVANCE: f32 = 0.6;

pub const QUOTE_RULE: Border = Border::new(3.0, color::QUOTE_RULE);
pub const QUOTE_INDENT: f32 = 14.0;
pub const QUOTE_SPACING: f32 = 8.0;
/// Quoted text is muted and set in the italic face.
pub const QUOTE_TEXT: Color = color::MUTED;

pub const RULE: Border = Border::new(0.5, color::BORDER_LIGHT);
pub const RULE_MARGIN: f32 = 12.0;

pub const TABLE_TEXT: TextStyle = TextStyle::new(9.5, FontWeight::Regular, color::TEXT, 1.4);
pub const TABLE_HEADER_BORDER: Border = Border::new(1.5, color::BORDER_HEAVY);
pub const TABLE_ROW_BORDER: Border = Border::new(0.5, color::BORDER_LIGHT);
pub const TABLE_CELL_PADDING: f32 = 4.0;
pub const TABLE_SPACING: f32 = 8.0;

pub const SPACER_HEIGHT: f32 = 8.0;

pub const LINK_COLOR: Color = color::LINK;
/// Italic runs use the oblique standard face, or the regular face of an
/// embedded family (none carries an italic file); this color marks them.
pub const ITALIC_COLOR: Color = color::MUTED;
