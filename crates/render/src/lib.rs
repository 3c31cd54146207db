//! Paginated PDF rendering for parsed feedback reports.
//!
//! Rendering is two-pass. [`paginate`] groups nodes into sections, the
//! layout pass places them on A4 pages as [`DrawCommand`]s, and
//! [`lay_out_report`] then stamps the header band on page 1 and a
//! `number/total` footer on every page before [`PdfReportWriter`]
//! serializes the result.

pub mod bands;
pub mod document;
pub mod error;
pub mod layout;
pub mod page;
pub mod paginate;
pub mod pdf;
pub mod typeface;

#[cfg(test)]
mod test_utils;

pub use bands::{HeaderBand, ReportMeta, format_timestamp};
pub use document::{lay_out_report, render_report};
pub use error::RenderError;
pub use page::{DrawCommand, FinishedPage, LaidOutPage};
pub use paginate::{MAX_NODES_PER_SECTION, paginate};
pub use pdf::PdfReportWriter;
pub use typeface::{FaceKind, Typeface};
