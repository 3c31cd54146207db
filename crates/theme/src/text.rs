use crate::color::Color;

/// The two weights a report font family carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    /// Multiplier applied to `size` to get the distance between baselines.
    pub line_height: f32,
    /// Set regular-weight text in the slanted face.
    pub italic: bool,
}

impl TextStyle {
    pub const fn new(size: f32, weight: FontWeight, color: Color, line_height: f32) -> Self {
        Self {
            size,
            weight,
            color,
            line_height,
            italic: false,
        }
    }

    /// Vertical advance of one line set in this style.
    pub fn leading(&self) -> f32 {
        self.size * self.line_height
    }

    pub const fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }

    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub const fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
