//! Page geometry and the header, score and footer bands.

use crate::color;
use crate::text::{Border, FontWeight, TextStyle};

/// A4 in PDF points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 48.0;

pub const CONTENT_LEFT: f32 = MARGIN;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub const FOOTER_HEIGHT: f32 = 28.0;
pub const FOOTER_TEXT: TextStyle = TextStyle::new(8.0, FontWeight::Regular, color::MUTED, 1.2);
pub const FOOTER_RULE: Border = Border::new(0.5, color::BORDER_LIGHT);

/// Top of the body area on any page without a header band.
pub const BODY_TOP: f32 = MARGIN;
/// Lowest y the body may reach; the footer band sits below it.
pub const BODY_BOTTOM: f32 = PAGE_HEIGHT - MARGIN - FOOTER_HEIGHT;

pub const TITLE: TextStyle = TextStyle::new(20.0, FontWeight::Bold, color::BLACK, 1.3);
pub const SUBTITLE: TextStyle = TextStyle::new(12.0, FontWeight::Regular, color::MUTED, 1.4);
pub const TIMESTAMP: TextStyle = TextStyle::new(9.0, FontWeight::Regular, color::MUTED, 1.4);
pub const HEADER_RULE: Border = Border::new(1.0, color::ACCENT);
pub const HEADER_GAP: f32 = 14.0;

pub const SCORE_BOX_WIDTH: f32 = 140.0;
pub const SCORE_BOX_HEIGHT: f32 = 56.0;
pub const SCORE_TEXT: TextStyle = TextStyle::new(24.0, FontWeight::Bold, color::ACCENT, 1.0);
pub const SCORE_BORDER: Border = Border::new(1.0, color::ACCENT);
pub const SCORE_BACKGROUND: color::Color = color::SCORE_BACKGROUND;
pub const SCORE_GAP: f32 = 16.0;

pub const DEFAULT_FOOTER_LABEL: &str = "AI Feedback Report";
