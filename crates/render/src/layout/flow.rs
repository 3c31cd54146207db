//! Vertical flow of content across physical pages.

use crate::page::{DrawCommand, LaidOutPage};
use feedback_pdf_theme::page::{BODY_BOTTOM, BODY_TOP};
use feedback_pdf_theme::{Border, Color};

const EPSILON: f32 = 0.01;

/// Decoration that spans the height of its content, drawn per page once
/// the extent on that page is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Vertical rule at `x` (blockquotes).
    Rule { x: f32, border: Border },
    /// Filled and bordered box (code blocks).
    Panel {
        x: f32,
        width: f32,
        fill: Color,
        border: Border,
    },
}

#[derive(Debug)]
struct OpenSegment {
    segment: Segment,
    start_y: f32,
    /// Command index the decoration is inserted at so it sits beneath its content.
    insert_at: usize,
}

#[derive(Debug)]
pub struct PageFlow {
    pages: Vec<LaidOutPage>,
    page: LaidOutPage,
    page_top: f32,
    y: f32,
    segments: Vec<OpenSegment>,
}

impl PageFlow {
    /// Starts the first page with its body beginning at `first_top`.
    pub fn new(first_top: f32) -> Self {
        Self {
            pages: Vec::new(),
            page: LaidOutPage::new(),
            page_top: first_top,
            y: first_top,
            segments: Vec::new(),
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.page_top).abs() < EPSILON
    }

    pub fn remaining(&self) -> f32 {
        BODY_BOTTOM - self.y
    }

    /// Height available on a fresh continuation page.
    pub fn page_capacity(&self) -> f32 {
        BODY_BOTTOM - BODY_TOP
    }

    /// Vertical whitespace. Dropped at the top of a page.
    pub fn gap(&mut self, height: f32) {
        if !self.at_page_top() {
            self.y += height;
        }
    }

    /// Claims `height` points, moving to a new page first when the current
    /// one cannot hold them. Returns the top of the claimed area.
    ///
    /// Content taller than a whole page is placed at the top of a page and
    /// allowed to overflow.
    pub fn reserve(&mut self, height: f32) -> f32 {
        if height > self.remaining() + EPSILON && !self.at_page_top() {
            self.new_page();
        }
        let top = self.y;
        self.y += height;
        top
    }

    /// Whether `height` fits on the current page without breaking.
    pub fn fits(&self, height: f32) -> bool {
        height <= self.remaining() + EPSILON
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.page.commands.push(command);
    }

    pub fn open_segment(&mut self, segment: Segment) {
        self.segments.push(OpenSegment {
            segment,
            start_y: self.y,
            insert_at: self.page.commands.len(),
        });
    }

    pub fn close_segment(&mut self) {
        if let Some(open) = self.segments.pop() {
            let end = self.y.min(BODY_BOTTOM);
            draw_segment(&mut self.page, &open, end);
        }
    }

    /// Ends the current page. Open segments are drawn up to the page bottom
    /// and continue from the top of the next page.
    pub fn new_page(&mut self) {
        let end = self.y.min(BODY_BOTTOM);
        for open in self.segments.iter().rev() {
            draw_segment(&mut self.page, open, end);
        }
        self.pages.push(std::mem::take(&mut self.page));
        self.page_top = BODY_TOP;
        self.y = BODY_TOP;
        for open in &mut self.segments {
            open.start_y = BODY_TOP;
            open.insert_at = 0;
        }
        log::trace!("Started page {}", self.pages.len() + 1);
    }

    pub fn finish(mut self) -> Vec<LaidOutPage> {
        while !self.segments.is_empty() {
            self.close_segment();
        }
        self.pages.push(self.page);
        self.pages
    }
}

fn draw_segment(page: &mut LaidOutPage, open: &OpenSegment, end: f32) {
    let height = end - open.start_y;
    if height < EPSILON {
        return;
    }
    let command = match open.segment {
        Segment::Rule { x, border } => DrawCommand::Line {
            x1: x,
            y1: open.start_y,
            x2: x,
            y2: end,
            border,
        },
        Segment::Panel {
            x,
            width,
            fill,
            border,
        } => DrawCommand::Rect {
            x,
            y: open.start_y,
            width,
            height,
            fill: Some(fill),
            stroke: Some(border),
        },
    };
    let at = open.insert_at.min(page.commands.len());
    page.commands.insert(at, command);
}
