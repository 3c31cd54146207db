//! Two-pass report assembly: lay out the body, then stamp bands.

use crate::bands::{HeaderBand, ReportMeta, footer};
use crate::error::RenderError;
use crate::layout::lay_out_sections;
use crate::page::FinishedPage;
use crate::paginate::paginate;
use crate::pdf::PdfReportWriter;
use crate::typeface::Typeface;
use feedback_pdf_markdown::Node;

/// Lays out a report and stamps the header onto page 1 and a footer with
/// `number/total` onto every page.
pub fn lay_out_report(
    nodes: &[Node],
    meta: &ReportMeta,
    typeface: &Typeface,
    footer_label: &str,
) -> Vec<FinishedPage> {
    let header = HeaderBand::build(meta, typeface);
    let sections = paginate(nodes);
    let pages = lay_out_sections(&sections, typeface, header.body_top());

    let total = pages.len();
    let mut header_commands = Some(header.commands);
    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| {
            let number = i + 1;
            let mut commands = header_commands.take().unwrap_or_default();
            commands.extend(page.commands);
            commands.extend(footer(footer_label, number, total, typeface));
            FinishedPage {
                number,
                total,
                commands,
            }
        })
        .collect()
}

/// Renders parsed report nodes to PDF bytes.
pub fn render_report(
    nodes: &[Node],
    meta: &ReportMeta,
    typeface: &Typeface,
    footer_label: &str,
) -> Result<Vec<u8>, RenderError> {
    let pages = lay_out_report(nodes, meta, typeface, footer_label);
    let mut writer = PdfReportWriter::new(&meta.title, typeface)?;
    for page in &pages {
        writer.write_page(page);
    }
    let bytes = writer.finish()?;
    log::info!(
        "Rendered '{}': {} nodes, {} pages, {} bytes",
        meta.title,
        nodes.len(),
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}
