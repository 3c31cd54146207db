//! Writes finished pages as PDF content streams with `printpdf`.

use crate::error::RenderError;
use crate::page::{DrawCommand, FinishedPage};
use crate::typeface::{FaceKind, Typeface};
use feedback_pdf_theme::page::{PAGE_HEIGHT, PAGE_WIDTH};
use feedback_pdf_theme::{Border, Color};
use printpdf::font::{BuiltinFont, ParsedFont};
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::{FontId, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb};

/// How a face is referenced from a content stream.
#[derive(Debug, Clone, PartialEq)]
enum PdfFont {
    Embedded(FontId),
    Builtin(BuiltinFont),
}

pub struct PdfReportWriter {
    document: PdfDocument,
    regular: PdfFont,
    bold: PdfFont,
    italic: PdfFont,
    mono: PdfFont,
}

impl PdfReportWriter {
    /// Creates a document titled `title`, embedding the typeface's faces
    /// when it has any.
    pub fn new(title: &str, typeface: &Typeface) -> Result<Self, RenderError> {
        let mut document = PdfDocument::new(title);
        let mut embed = |kind: FaceKind, fallback: BuiltinFont| -> Result<PdfFont, RenderError> {
            match typeface.font_data(kind) {
                Some(data) => {
                    let mut warnings = Vec::new();
                    let font = ParsedFont::from_bytes(data, 0, &mut warnings).ok_or_else(|| {
                        RenderError::Font(format!(
                            "Failed to parse {:?} face of '{}'",
                            kind,
                            typeface.family()
                        ))
                    })?;
                    Ok(PdfFont::Embedded(document.add_font(&font)))
                }
                None => Ok(PdfFont::Builtin(fallback)),
            }
        };
        let regular = embed(FaceKind::Regular, BuiltinFont::Helvetica)?;
        let bold = embed(FaceKind::Bold, BuiltinFont::HelveticaBold)?;
        let italic = standard_or_embedded(&regular, BuiltinFont::HelveticaOblique);
        let mono = standard_or_embedded(&regular, BuiltinFont::Courier);
        Ok(Self {
            document,
            regular,
            bold,
            italic,
            mono,
        })
    }

    fn font(&self, face: FaceKind) -> PdfFont {
        match face {
            FaceKind::Regular => self.regular.clone(),
            FaceKind::Bold => self.bold.clone(),
            FaceKind::Italic => self.italic.clone(),
            FaceKind::Mono => self.mono.clone(),
        }
    }

    pub fn write_page(&mut self, page: &FinishedPage) {
        let mut ops = PageOps::new();
        for command in &page.commands {
            match command {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    size,
                    face,
                    color,
                } => ops.text(*x, *y, text, *size, self.font(*face), *color),
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => ops.rect(*x, *y, *width, *height, *fill, *stroke),
                DrawCommand::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    border,
                } => ops.line(*x1, *y1, *x2, *y2, *border),
            }
        }
        let page = PdfPage::new(
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            ops.into_ops(),
        );
        self.document.pages.push(page);
    }

    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        if self.document.pages.is_empty() {
            return Err(RenderError::Pdf("Document has no pages".to_string()));
        }
        let mut warnings = Vec::new();
        let bytes = self.document.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF serialization produced {} warnings", warnings.len());
        }
        Ok(bytes)
    }
}

/// Standard faces only encode WinAnsi, so with an embedded family the
/// italic and code faces reuse its regular face.
fn standard_or_embedded(regular: &PdfFont, standard: BuiltinFont) -> PdfFont {
    match regular {
        PdfFont::Embedded(id) => PdfFont::Embedded(id.clone()),
        PdfFont::Builtin(_) => PdfFont::Builtin(standard),
    }
}

/// Tracks text-section, font and fill state for one page's content stream.
struct PageOps {
    ops: Vec<Op>,
    is_text_section_open: bool,
    current_font: Option<(PdfFont, f32)>,
    current_fill: Option<Color>,
}

impl PageOps {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            is_text_section_open: false,
            current_font: None,
            current_fill: None,
        }
    }

    fn into_ops(mut self) -> Vec<Op> {
        self.close_text_section_if_open();
        self.ops
    }

    fn close_text_section_if_open(&mut self) {
        if self.is_text_section_open {
            self.ops.push(Op::EndTextSection);
            self.is_text_section_open = false;
        }
    }

    fn set_fill(&mut self, color: Color) {
        if self.current_fill != Some(color) {
            self.ops.push(Op::SetFillColor {
                col: to_pdf_color(color),
            });
            self.current_fill = Some(color);
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, font: PdfFont, color: Color) {
        if text.is_empty() {
            return;
        }
        if !self.is_text_section_open {
            self.ops.push(Op::StartTextSection);
            self.is_text_section_open = true;
            self.current_font = None;
        }
        self.set_fill(color);

        let wanted = (font.clone(), size);
        if self.current_font.as_ref() != Some(&wanted) {
            match &font {
                PdfFont::Embedded(id) => self.ops.push(Op::SetFontSize {
                    size: Pt(size),
                    font: id.clone(),
                }),
                PdfFont::Builtin(builtin) => self.ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: builtin.clone(),
                }),
            }
            self.current_font = Some(wanted);
        }

        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(flip_y(y))),
        });
        let items = vec![TextItem::Text(text.to_string())];
        match font {
            PdfFont::Embedded(id) => self.ops.push(Op::WriteText { items, font: id }),
            PdfFont::Builtin(builtin) => self.ops.push(Op::WriteTextBuiltinFont {
                items,
                font: builtin,
            }),
        }
    }

    fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Border>,
    ) {
        self.close_text_section_if_open();
        let bottom = flip_y(y + height);
        let points = vec![
            point(x, bottom),
            point(x + width, bottom),
            point(x + width, bottom + height),
            point(x, bottom + height),
        ];
        let mode = match (fill, stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };
        if let Some(color) = fill {
            self.set_fill(color);
        }
        if let Some(border) = stroke {
            self.set_outline(border);
        }
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing { points }],
                mode,
                winding_order: WindingOrder::EvenOdd,
            },
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, border: Border) {
        self.close_text_section_if_open();
        self.set_outline(border);
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: vec![point(x1, flip_y(y1)), point(x2, flip_y(y2))],
                }],
                mode: PaintMode::Stroke,
                winding_order: WindingOrder::EvenOdd,
            },
        });
    }

    fn set_outline(&mut self, border: Border) {
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(border.width),
        });
        self.ops.push(Op::SetOutlineColor {
            col: to_pdf_color(border.color),
        });
    }
}

/// Layout uses a top-left origin; PDF user space starts bottom-left.
fn flip_y(y: f32) -> f32 {
    PAGE_HEIGHT - y
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn to_pdf_color(c: Color) -> printpdf::color::Color {
    let (r, g, b) = c.to_unit();
    printpdf::color::Color::Rgb(Rgb::new(r, g, b, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_pdf_theme::color;

    fn page(commands: Vec<DrawCommand>) -> FinishedPage {
        FinishedPage {
            number: 1,
            total: 1,
            commands,
        }
    }

    #[test]
    fn test_flip_y() {
        assert_eq!(flip_y(0.0), PAGE_HEIGHT);
        assert_eq!(flip_y(PAGE_HEIGHT), 0.0);
    }

    #[test]
    fn test_text_state_is_not_repeated() {
        let mut ops = PageOps::new();
        let font = PdfFont::Builtin(BuiltinFont::Helvetica);
        ops.text(10.0, 10.0, "a", 10.0, font.clone(), color::TEXT);
        ops.text(10.0, 30.0, "b", 10.0, font, color::TEXT);
        let ops = ops.into_ops();
        let font_changes = ops
            .iter()
            .filter(|op| matches!(op, Op::SetFontSizeBuiltinFont { .. }))
            .count();
        let fills = ops.iter().filter(|op| matches!(op, Op::SetFillColor { .. })).count();
        assert_eq!(font_changes, 1);
        assert_eq!(fills, 1);
        assert!(matches!(ops.last(), Some(Op::EndTextSection)));
    }

    #[test]
    fn test_shapes_close_the_text_section() {
        let mut ops = PageOps::new();
        ops.text(0.0, 10.0, "a", 10.0, PdfFont::Builtin(BuiltinFont::Helvetica), color::TEXT);
        ops.line(0.0, 20.0, 100.0, 20.0, Border::new(1.0, color::ACCENT));
        let ops = ops.into_ops();
        let end = ops.iter().position(|op| matches!(op, Op::EndTextSection));
        let draw = ops.iter().position(|op| matches!(op, Op::DrawPolygon { .. }));
        assert!(end < draw);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::EndTextSection)).count(), 1);
    }

    #[test]
    fn test_code_follows_an_embedded_regular_face() {
        let id = FontId::new();
        assert_eq!(
            standard_or_embedded(&PdfFont::Embedded(id.clone()), BuiltinFont::Courier),
            PdfFont::Embedded(id)
        );
        assert_eq!(
            standard_or_embedded(&PdfFont::Builtin(BuiltinFont::Helvetica), BuiltinFont::Courier),
            PdfFont::Builtin(BuiltinFont::Courier)
        );
    }

    #[test]
    fn test_standard_writer_faces() {
        let writer = PdfReportWriter::new("Report", &Typeface::standard()).unwrap();
        assert_eq!(writer.font(FaceKind::Mono), PdfFont::Builtin(BuiltinFont::Courier));
        assert_eq!(
            writer.font(FaceKind::Italic),
            PdfFont::Builtin(BuiltinFont::HelveticaOblique)
        );
    }

    #[test]
    fn test_writer_saves_all_pages() {
        let mut writer = PdfReportWriter::new("Report", &Typeface::standard()).unwrap();
        for _ in 0..3 {
            writer.write_page(&page(vec![DrawCommand::Text {
                x: 48.0,
                y: 60.0,
                text: "Hello".to_string(),
                size: 10.0,
                face: FaceKind::Regular,
                color: color::TEXT,
            }]));
        }
        let bytes = writer.finish().unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_writer_without_pages_fails() {
        let writer = PdfReportWriter::new("Empty", &Typeface::standard()).unwrap();
        assert!(matches!(writer.finish(), Err(RenderError::Pdf(_))));
    }
}
