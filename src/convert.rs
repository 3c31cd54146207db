//! The conversion entry point: markdown and metadata in, PDF bytes out.

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use feedback_pdf_fonts::FontProvisioner;
use feedback_pdf_markdown::parse_report;
use feedback_pdf_render::{ReportMeta, Typeface, render_report};
use std::sync::Arc;

/// Converts feedback reports using one font provisioner.
///
/// Converters sharing a provisioner share its one-time font registration.
#[derive(Debug, Clone)]
pub struct Converter {
    provisioner: Arc<FontProvisioner>,
    options: ConvertOptions,
}

impl Converter {
    /// A converter with its own provisioner built from `options.fonts`.
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        let provisioner = Arc::new(FontProvisioner::new(options.fonts.clone())?);
        Ok(Self {
            provisioner,
            options,
        })
    }

    pub fn with_provisioner(provisioner: Arc<FontProvisioner>, options: ConvertOptions) -> Self {
        Self {
            provisioner,
            options,
        }
    }

    /// The process-wide converter configured from the environment.
    pub fn global() -> Result<Self, ConvertError> {
        Ok(Self::with_provisioner(
            feedback_pdf_fonts::global()?,
            ConvertOptions::from_env(),
        ))
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn provisioner(&self) -> &Arc<FontProvisioner> {
        &self.provisioner
    }

    /// Sanitizes and parses `markdown`, waits for the report font family,
    /// then renders the PDF.
    ///
    /// Fails without output when the font family cannot be resolved.
    pub async fn convert(&self, markdown: &str, meta: &ReportMeta) -> Result<Vec<u8>, ConvertError> {
        let nodes = parse_report(markdown);
        log::debug!("Parsed {} top-level nodes", nodes.len());

        let family = self.provisioner.ensure_registered().await?;
        let typeface = Typeface::from_family(&family)?;
        let bytes = render_report(&nodes, meta, &typeface, &self.options.footer_label)?;
        log::info!("Converted '{}' ({} bytes of markdown)", meta.title, markdown.len());
        Ok(bytes)
    }
}

/// Renders with an already available typeface, skipping font provisioning.
pub fn render_markdown(
    markdown: &str,
    meta: &ReportMeta,
    typeface: &Typeface,
    options: &ConvertOptions,
) -> Result<Vec<u8>, ConvertError> {
    let nodes = parse_report(markdown);
    Ok(render_report(&nodes, meta, typeface, &options.footer_label)?)
}

/// Converts with the process-wide provisioner and environment options.
pub async fn convert(markdown: &str, meta: &ReportMeta) -> Result<Vec<u8>, ConvertError> {
    Converter::global()?.convert(markdown, meta).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_with_standard_typeface() {
        let bytes = render_markdown(
            "# Title\n\nHello",
            &ReportMeta::new("Title"),
            &Typeface::standard(),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_converters_share_global_provisioner() {
        let a = Converter::global().unwrap();
        let b = Converter::global().unwrap();
        assert!(Arc::ptr_eq(a.provisioner(), b.provisioner()));
    }
}
