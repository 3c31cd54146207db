//! Places each block node on the page flow according to the style table.

use super::flow::{PageFlow, Segment};
use super::text::{Line, Run, hard_wrap, runs_for_spans, wrap};
use crate::page::DrawCommand;
use crate::typeface::{FaceKind, Typeface};
use feedback_pdf_markdown::{InlineSpan, ListItem, Node};
use feedback_pdf_theme::blocks::*;
use feedback_pdf_theme::{FontWeight, TextStyle, heading_style};

/// Horizontal band the current blocks are laid out in.
#[derive(Debug, Clone, Copy)]
pub struct Area {
    pub x: f32,
    pub width: f32,
    /// Inside a blockquote: default text is muted.
    pub quoted: bool,
}

pub struct BlockLayouter<'a> {
    typeface: &'a Typeface,
    flow: PageFlow,
}

impl<'a> BlockLayouter<'a> {
    pub fn new(typeface: &'a Typeface, flow: PageFlow) -> Self {
        Self { typeface, flow }
    }

    pub fn flow_mut(&mut self) -> &mut PageFlow {
        &mut self.flow
    }

    pub fn into_flow(self) -> PageFlow {
        self.flow
    }

    pub fn layout_nodes(&mut self, nodes: &[Node], area: Area) {
        for node in nodes {
            self.layout_node(node, area);
        }
    }

    fn layout_node(&mut self, node: &Node, area: Area) {
        match node {
            Node::Heading { depth, spans } => self.heading(*depth, spans, area),
            Node::Paragraph { spans } => self.paragraph(spans, area),
            Node::List {
                ordered,
                start,
                items,
            } => self.list(*ordered, *start, items, area),
            Node::CodeBlock { text, .. } => self.code_block(text, area),
            Node::Blockquote { children } => self.blockquote(children, area),
            Node::ThematicBreak => self.thematic_break(area),
            Node::Table { header, rows } => self.table(header, rows, area),
            Node::Spacer => self.flow.gap(SPACER_HEIGHT),
            Node::Raw { text } => self.paragraph(&[InlineSpan::text(text.as_str())], area),
        }
    }

    fn base(&self, style: TextStyle, area: Area) -> TextStyle {
        if area.quoted {
            style.with_color(QUOTE_TEXT).with_italic()
        } else {
            style
        }
    }

    fn wrap_spans(&self, spans: &[InlineSpan], style: &TextStyle, width: f32) -> Vec<Line> {
        let runs = runs_for_spans(spans, style);
        wrap(&runs, style.size, width, self.typeface)
    }

    /// Draws one wrapped line whose box starts at `top`.
    fn draw_line(&mut self, line: &Line, x: f32, top: f32, style: &TextStyle) {
        let baseline = baseline(top, style);
        for fragment in &line.fragments {
            self.flow.push(DrawCommand::Text {
                x: x + fragment.x,
                y: baseline,
                text: fragment.text.clone(),
                size: style.size,
                face: fragment.face,
                color: fragment.color,
            });
        }
    }

    /// Lines that may each continue on the next page.
    fn flow_lines(&mut self, lines: &[Line], x: f32, style: &TextStyle) {
        for line in lines {
            let top = self.flow.reserve(style.leading());
            self.draw_line(line, x, top, style);
        }
    }

    fn heading(&mut self, depth: u8, spans: &[InlineSpan], area: Area) {
        let heading = heading_style(depth);
        let style = self.base(heading.text, area);
        let lines = self.wrap_spans(spans, &style, area.width);

        self.flow.gap(heading.margin_top);
        let border = heading.border_bottom.map_or(0.0, |b| b.width + 3.0);
        let height = lines.len() as f32 * style.leading() + border;
        if height <= self.flow.page_capacity() {
            let top = self.flow.reserve(height);
            for (i, line) in lines.iter().enumerate() {
                self.draw_line(line, area.x, top + i as f32 * style.leading(), &style);
            }
        } else {
            self.flow_lines(&lines, area.x, &style);
        }

        if let Some(border) = heading.border_bottom {
            let y = self.flow.y() - border.width / 2.0;
            self.flow.push(DrawCommand::Line {
                x1: area.x,
                y1: y,
                x2: area.x + area.width,
                y2: y,
                border,
            });
        }
        self.flow.gap(heading.margin_bottom);
    }

    fn paragraph(&mut self, spans: &[InlineSpan], area: Area) {
        let style = self.base(PARAGRAPH, area);
        let lines = self.wrap_spans(spans, &style, area.width);
        self.flow_lines(&lines, area.x, &style);
        self.flow.gap(PARAGRAPH_SPACING);
    }

    fn list(&mut self, ordered: bool, start: u64, items: &[ListItem], area: Area) {
        let style = self.base(PARAGRAPH, area);
        let text_x = area.x + LIST_MARKER_WIDTH;
        let text_width = (area.width - LIST_MARKER_WIDTH).max(1.0);

        for (i, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}.", start.saturating_add(i as u64))
            } else {
                BULLET.to_string()
            };
            let mut lines = self.wrap_spans(&item.spans, &style, text_width);
            if lines.is_empty() {
                lines.push(Line::default());
            }

            let height = lines.len() as f32 * style.leading();
            let first_top = if height <= self.flow.page_capacity() {
                let top = self.flow.reserve(height);
                for (n, line) in lines.iter().enumerate() {
                    self.draw_line(line, text_x, top + n as f32 * style.leading(), &style);
                }
                top
            } else {
                let top = self.flow.reserve(style.leading());
                self.draw_line(&lines[0], text_x, top, &style);
                self.flow_lines(&lines[1..], text_x, &style);
                top
            };

            self.flow.push(DrawCommand::Text {
                x: area.x,
                y: baseline(first_top, &style),
                text: marker,
                size: style.size,
                face: FaceKind::from(style.weight),
                color: style.color,
            });
            if i + 1 < items.len() {
                self.flow.gap(LIST_ITEM_GAP);
            }
        }
        self.flow.gap(LIST_SPACING);
    }

    fn code_block(&mut self, text: &str, area: Area) {
        let style = CODE;
        let inner = area.width - 2.0 * CODE_PADDING;
        let lines = hard_wrap(text, style.size, inner, self.typeface);

        if !self.flow.fits(2.0 * CODE_PADDING + style.leading()) && !self.flow.at_page_top() {
            self.flow.new_page();
        }
        self.flow.open_segment(Segment::Panel {
            x: area.x,
            width: area.width,
            fill: CODE_BACKGROUND,
            border: CODE_BORDER,
        });
        self.flow.reserve(CODE_PADDING);
        for line in &lines {
            let top = self.flow.reserve(style.leading());
            if !line.is_empty() {
                self.flow.push(DrawCommand::Text {
                    x: area.x + CODE_PADDING,
                    y: baseline(top, &style),
                    text: line.clone(),
                    size: style.size,
                    face: FaceKind::Mono,
                    color: style.color,
                });
            }
        }
        self.flow.reserve(CODE_PADDING);
        self.flow.close_segment();
        self.flow.gap(CODE_SPACING);
    }

    fn blockquote(&mut self, children: &[Node], area: Area) {
        self.flow.open_segment(Segment::Rule {
            x: area.x + QUOTE_RULE.width / 2.0,
            border: QUOTE_RULE,
        });
        let inner = Area {
            x: area.x + QUOTE_INDENT,
            width: (area.width - QUOTE_INDENT).max(1.0),
            quoted: true,
        };
        self.layout_nodes(children, inner);
        self.flow.close_segment();
        self.flow.gap(QUOTE_SPACING);
    }

    fn thematic_break(&mut self, area: Area) {
        self.flow.gap(RULE_MARGIN);
        let top = self.flow.reserve(RULE.width);
        let y = top + RULE.width / 2.0;
        self.flow.push(DrawCommand::Line {
            x1: area.x,
            y1: y,
            x2: area.x + area.width,
            y2: y,
            border: RULE,
        });
        self.flow.gap(RULE_MARGIN);
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>], area: Area) {
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
            .max(1);
        let column_width = area.width / columns as f32;
        let body = self.base(TABLE_TEXT, area);
        let head = body.with_weight(FontWeight::Bold);

        if !header.is_empty() {
            self.table_row(header, columns, column_width, &head, TABLE_HEADER_BORDER, area);
        }
        for row in rows {
            self.table_row(row, columns, column_width, &body, TABLE_ROW_BORDER, area);
        }
        self.flow.gap(TABLE_SPACING);
    }

    /// Rows are never split across pages.
    fn table_row(
        &mut self,
        cells: &[String],
        columns: usize,
        column_width: f32,
        style: &TextStyle,
        border: feedback_pdf_theme::Border,
        area: Area,
    ) {
        let cell_width = (column_width - 2.0 * TABLE_CELL_PADDING).max(1.0);
        let face = FaceKind::from(style.weight);
        let wrapped: Vec<Vec<Line>> = (0..columns)
            .map(|c| {
                let text = cells.get(c).map(String::as_str).unwrap_or("");
                let runs = [Run::new(text, face, style.color)];
                wrap(&runs, style.size, cell_width, self.typeface)
            })
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let height = line_count as f32 * style.leading() + 2.0 * TABLE_CELL_PADDING + border.width;

        let top = self.flow.reserve(height);
        for (c, lines) in wrapped.iter().enumerate() {
            let x = area.x + c as f32 * column_width + TABLE_CELL_PADDING;
            for (n, line) in lines.iter().enumerate() {
                let line_top = top + TABLE_CELL_PADDING + n as f32 * style.leading();
                self.draw_line(line, x, line_top, style);
            }
        }
        let y = top + height - border.width / 2.0;
        self.flow.push(DrawCommand::Line {
            x1: area.x,
            y1: y,
            x2: area.x + area.width,
            y2: y,
            border,
        });
    }
}

/// Baseline of a line box starting at `top`, with the glyphs centered in
/// the leading.
pub fn baseline(top: f32, style: &TextStyle) -> f32 {
    top + (style.leading() - style.size) / 2.0 + style.size * 0.8
}
