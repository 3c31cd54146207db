//! Positioned drawing commands produced by layout.
//!
//! Coordinates are in points with the origin at the top-left of the page and
//! `y` growing downwards. The PDF writer flips them.

use crate::typeface::FaceKind;
use feedback_pdf_theme::{Border, Color};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        /// Baseline position.
        y: f32,
        text: String,
        size: f32,
        face: FaceKind,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Border>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        border: Border,
    },
}

/// A physical page after body layout, before bands are stamped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub commands: Vec<DrawCommand>,
}

impl LaidOutPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text on the page in drawing order, one command per line.
    pub fn text_lines(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A page with its header (page 1 only) and footer in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedPage {
    pub number: usize,
    pub total: usize,
    pub commands: Vec<DrawCommand>,
}

impl FinishedPage {
    pub fn text_lines(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_lines().iter().any(|t| t.contains(needle))
    }
}
