//! Greedy line breaking over styled runs.

use crate::typeface::{FaceKind, Typeface};
use feedback_pdf_markdown::InlineSpan;
use feedback_pdf_theme::blocks::{ITALIC_COLOR, LINK_COLOR};
use feedback_pdf_theme::{Color, FontWeight, TextStyle, color};

/// A stretch of text sharing one face and color.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub face: FaceKind,
    pub color: Color,
}

impl Run {
    pub fn new(text: impl Into<String>, face: FaceKind, color: Color) -> Self {
        Self {
            text: text.into(),
            face,
            color,
        }
    }
}

/// Maps inline spans onto runs for a block whose default style is `base`.
pub fn runs_for_spans(spans: &[InlineSpan], base: &TextStyle) -> Vec<Run> {
    let regular = match (base.weight, base.italic) {
        (FontWeight::Regular, true) => FaceKind::Italic,
        (weight, _) => FaceKind::from(weight),
    };
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Text { text } => Run::new(text.as_str(), regular, base.color),
            InlineSpan::Bold { text } => Run::new(text.as_str(), FaceKind::Bold, base.color),
            InlineSpan::Italic { text } => Run::new(text.as_str(), FaceKind::Italic, ITALIC_COLOR),
            InlineSpan::CodeSpan { text } => Run::new(text.as_str(), FaceKind::Mono, color::CODE_TEXT),
            InlineSpan::Link { text, .. } => Run::new(text.as_str(), regular, LINK_COLOR),
        })
        .collect()
}

/// Text placed at an offset from the start of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub face: FaceKind,
    pub color: Color,
    pub x: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    pub width: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Appends `text` at the end of the line, extending the last fragment
    /// when the style matches and nothing separates them.
    fn push(&mut self, text: &str, run: &Run, width: f32, space: f32) {
        let x = self.width + space;
        match self.fragments.last_mut() {
            Some(last) if last.face == run.face && last.color == run.color => {
                if space > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(text);
            }
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                face: run.face,
                color: run.color,
                x,
            }),
        }
        self.width = x + width;
    }
}

/// A piece of one run inside an atom.
struct Piece<'a> {
    text: String,
    run: &'a Run,
}

/// An unbreakable sequence of pieces. Pieces from adjacent runs with no
/// whitespace between them glue into one atom.
struct Atom<'a> {
    pieces: Vec<Piece<'a>>,
    space_before: bool,
}

fn atoms<'a>(runs: &'a [Run], typeface: &Typeface) -> Vec<Atom<'a>> {
    let mut atoms: Vec<Atom<'a>> = Vec::new();
    let mut pending_space = false;
    let mut open = false;

    for run in runs {
        for (i, word) in run.text.split(char::is_whitespace).enumerate() {
            if i > 0 {
                open = false;
                pending_space = true;
            }
            if word.is_empty() {
                continue;
            }
            for (j, piece) in typeface.hyphenate(word).into_iter().enumerate() {
                let piece = Piece { text: piece, run };
                match atoms.last_mut() {
                    Some(last) if open && j == 0 => last.pieces.push(piece),
                    _ => atoms.push(Atom {
                        pieces: vec![piece],
                        space_before: pending_space && j == 0,
                    }),
                }
                pending_space = false;
                open = true;
            }
        }
    }
    atoms
}

/// Breaks `runs` into lines no wider than `max_width`.
///
/// Whitespace collapses to single spaces. A word wider than a whole line is
/// split between characters.
pub fn wrap(runs: &[Run], size: f32, max_width: f32, typeface: &Typeface) -> Vec<Line> {
    let space_width = typeface.measure(" ", FaceKind::Regular, size);
    let mut lines = Vec::new();
    let mut line = Line::default();

    for atom in atoms(runs, typeface) {
        let widths: Vec<f32> = atom
            .pieces
            .iter()
            .map(|p| typeface.measure(&p.text, p.run.face, size))
            .collect();
        let atom_width: f32 = widths.iter().sum();
        let mut space = if atom.space_before && !line.is_empty() {
            space_width
        } else {
            0.0
        };

        if !line.is_empty() && line.width + space + atom_width > max_width {
            lines.push(std::mem::take(&mut line));
            space = 0.0;
        }

        if line.is_empty() && atom_width > max_width {
            for piece in &atom.pieces {
                for ch in piece.text.chars() {
                    let mut buf = [0u8; 4];
                    let ch = ch.encode_utf8(&mut buf);
                    let w = typeface.measure(ch, piece.run.face, size);
                    if !line.is_empty() && line.width + w > max_width {
                        lines.push(std::mem::take(&mut line));
                    }
                    line.push(ch, piece.run, w, 0.0);
                }
            }
            continue;
        }

        for (piece, width) in atom.pieces.iter().zip(widths) {
            line.push(&piece.text, piece.run, width, space);
            space = 0.0;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Splits preformatted text at the character that would overflow `max_width`.
/// Every source line yields at least one (possibly empty) output line.
pub fn hard_wrap(text: &str, size: f32, max_width: f32, typeface: &Typeface) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf = [0u8; 4];
    for source in text.split('\n') {
        let source = source.trim_end_matches('\r').replace('\t', "    ");
        if source.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut width = 0.0;
        for ch in source.chars() {
            let w = typeface.measure(ch.encode_utf8(&mut buf), FaceKind::Mono, size);
            if !current.is_empty() && width + w > max_width {
                out.push(std::mem::take(&mut current));
                width = 0.0;
            }
            current.push(ch);
            width += w;
        }
        out.push(current);
    }
    out
}
