//! Converts markdown feedback reports into paginated A4 PDF documents.
//!
//! The pipeline runs sanitize → parse → paginate → (await fonts) → render:
//!
//! ```no_run
//! # async fn run() -> Result<(), feedback_pdf::ConvertError> {
//! use feedback_pdf::{ConvertOptions, Converter, ReportMeta};
//!
//! let converter = Converter::new(ConvertOptions::from_env())?;
//! let meta = ReportMeta::new("Essay Feedback").with_score(86);
//! let pdf = converter.convert("# Summary\n\nWell structured.", &meta).await?;
//! std::fs::write("feedback.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod error;

pub use config::ConvertOptions;
pub use convert::{Converter, convert, render_markdown};
pub use error::ConvertError;

pub use feedback_pdf_fonts::{FontConfig, FontError, FontProvisioner};
pub use feedback_pdf_markdown::{InlineSpan, Node, parse_report};
pub use feedback_pdf_render::{ReportMeta, Typeface};
