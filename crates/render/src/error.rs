use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Layout error: {0}")]
    Layout(String),
}
