/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Returns the components scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

pub const BLACK: Color = Color::gray(0x1a);
pub const TEXT: Color = Color::rgb(0x1f, 0x29, 0x37);
pub const MUTED: Color = Color::rgb(0x6b, 0x72, 0x80);
pub const ACCENT: Color = Color::rgb(0x25, 0x63, 0xeb);
pub const LINK: Color = Color::rgb(0x1d, 0x4e, 0xd8);
pub const CODE_TEXT: Color = Color::rgb(0x37, 0x41, 0x51);
pub const CODE_BACKGROUND: Color = Color::gray(0xf5);
pub const BORDER_LIGHT: Color = Color::gray(0xdd);
pub const BORDER_HEAVY: Color = Color::rgb(0x37, 0x41, 0x51);
pub const QUOTE_RULE: Color = Color::rgb(0xd1, 0xd5, 0xdb);
pub const SCORE_BACKGROUND: Color = Color::rgb(0xef, 0xf6, 0xff);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_unit_scales_components() {
        let (r, g, b) = Color::rgb(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}
