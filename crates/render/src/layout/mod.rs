//! Body layout: sections onto physical pages.
//!
//! - `text`: runs and greedy line breaking
//! - `flow`: vertical cursor, page breaks, page-spanning decorations
//! - `blocks`: per-node placement

pub mod blocks;
pub mod flow;
pub mod text;

use crate::page::LaidOutPage;
use crate::typeface::Typeface;
use blocks::{Area, BlockLayouter};
use feedback_pdf_markdown::Node;
use feedback_pdf_theme::page::{CONTENT_LEFT, CONTENT_WIDTH};
use flow::PageFlow;

/// Lays out every section, each beginning on a fresh page.
///
/// The first page's body starts at `first_top` to leave room for the header
/// band. At least one page is always produced.
pub fn lay_out_sections(sections: &[&[Node]], typeface: &Typeface, first_top: f32) -> Vec<LaidOutPage> {
    let area = Area {
        x: CONTENT_LEFT,
        width: CONTENT_WIDTH,
        quoted: false,
    };
    let mut layouter = BlockLayouter::new(typeface, PageFlow::new(first_top));
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            layouter.flow_mut().new_page();
        }
        layouter.layout_nodes(section, area);
    }
    let pages = layouter.into_flow().finish();
    log::debug!("Laid out {} sections on {} pages", sections.len(), pages.len());
    pages
}
