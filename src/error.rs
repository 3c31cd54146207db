use feedback_pdf_fonts::FontError;
use feedback_pdf_render::RenderError;
use thiserror::Error;

/// Error type for a whole markdown-to-PDF conversion.
///
/// A conversion either returns complete PDF bytes or one of these; no
/// partial output is ever produced.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Font resolution failed: {0}")]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
