#![allow(dead_code)]

use async_trait::async_trait;
use feedback_pdf::{ConvertOptions, Converter, FontConfig, FontError, FontProvisioner};
use feedback_pdf_fonts::FontFetcher;
use lopdf::Document as LopdfDocument;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// `BaseFont` names of every font dictionary in the document.
    pub fn font_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (_, object) in self.doc.objects.iter() {
            if let Ok(dict) = object.as_dict()
                && let Ok(type_val) = dict.get(b"Type")
                && let Ok(type_name) = type_val.as_name()
                && type_name == b"Font"
                && let Ok(base_font) = dict.get(b"BaseFont")
                && let Ok(font_name) = base_font.as_name()
            {
                names.push(String::from_utf8_lossy(font_name).to_string());
            }
        }
        names
    }
}

#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Serves font requests from memory. Files listed in `statuses` fail with
/// that HTTP status; everything else returns `payload`.
#[derive(Debug)]
pub struct MockFetcher {
    pub payload: Vec<u8>,
    pub statuses: HashMap<String, u16>,
    pub calls: AtomicUsize,
}

impl MockFetcher {
    pub fn serving(payload: Vec<u8>) -> Self {
        Self {
            payload,
            statuses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, file: &str, status: u16) -> Self {
        self.statuses.insert(file.to_string(), status);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FontError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let file = url.rsplit('/').next().unwrap_or_default();
        match self.statuses.get(file) {
            Some(&status) => Err(FontError::Fetch {
                url: url.to_string(),
                status,
            }),
            None => Ok(self.payload.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "MockFetcher"
    }
}

/// Empty local and cache directories for one test.
pub struct FontDirs {
    pub local: TempDir,
    pub cache: TempDir,
}

impl FontDirs {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            local: tempfile::tempdir()?,
            cache: tempfile::tempdir()?,
        })
    }

    pub fn config(&self) -> FontConfig {
        FontConfig {
            local_dir: self.local.path().to_path_buf(),
            cache_dir: self.cache.path().join("fonts"),
            base_url: Some("https://fonts.test".to_string()),
            ..Default::default()
        }
    }
}

pub fn converter(config: FontConfig, fetcher: Arc<MockFetcher>) -> Converter {
    let provisioner = Arc::new(FontProvisioner::with_fetcher(config.clone(), fetcher));
    let options = ConvertOptions {
        fonts: config,
        ..Default::default()
    };
    Converter::with_provisioner(provisioner, options)
}

/// A TrueType font installed on the host, if any.
pub fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(Path::new)
    .find(|p| p.exists())
    .map(Path::to_path_buf)
}
