use clap::Parser;
use feedback_pdf::{ConvertError, ConvertOptions, Converter, ReportMeta, parse_report};
use std::path::PathBuf;

/// Converts a markdown feedback report into a paginated PDF.
#[derive(Parser, Debug)]
#[command(name = "feedback-pdf", version)]
struct Args {
    /// Markdown report to convert
    input: PathBuf,

    /// Where to write the PDF
    output: PathBuf,

    /// Title shown in the header band
    #[arg(long)]
    title: String,

    #[arg(long)]
    subtitle: Option<String>,

    /// Overall score, 0-100
    #[arg(long, allow_negative_numbers = true)]
    score: Option<i64>,

    /// ISO-8601 timestamp of the feedback run
    #[arg(long)]
    timestamp: Option<String>,

    /// Footer label (defaults to FEEDBACK_PDF_FOOTER_LABEL or "AI Feedback Report")
    #[arg(long)]
    footer_label: Option<String>,

    /// Print the parsed node tree as JSON instead of rendering
    #[arg(long)]
    dump_nodes: bool,
}

#[tokio::main]
async fn main() -> Result<(), ConvertError> {
    env_logger::init();
    let args = Args::parse();

    let markdown = std::fs::read_to_string(&args.input)?;

    if args.dump_nodes {
        let json = serde_json::to_string_pretty(&parse_report(&markdown))
            .map_err(|e| ConvertError::Config(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let mut options = ConvertOptions::from_env();
    if let Some(label) = args.footer_label {
        options = options.with_footer_label(label);
    }

    let mut meta = ReportMeta::new(args.title);
    meta.subtitle = args.subtitle;
    meta.score = args.score;
    meta.timestamp = args.timestamp;

    let converter = Converter::with_provisioner(feedback_pdf_fonts::global()?, options);
    let pdf = converter.convert(&markdown, &meta).await?;
    std::fs::write(&args.output, &pdf)?;
    log::info!("Wrote {} ({} bytes)", args.output.display(), pdf.len());
    Ok(())
}
