//! Where the report font family comes from.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Explicit origin serving `/fonts/...`.
pub const BASE_URL_ENV: &str = "FEEDBACK_PDF_FONT_BASE_URL";
/// Host name the deployment platform exposes for the running app.
pub const DEPLOYMENT_URL_ENV: &str = "VERCEL_URL";
/// Directory holding the bundled font files.
pub const FONT_DIR_ENV: &str = "FEEDBACK_PDF_FONT_DIR";
pub const FALLBACK_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub regular_file: String,
    pub bold_file: String,
    /// Bundled fonts shipped next to the binary.
    pub local_dir: PathBuf,
    /// Process-temp cache written after a successful remote fetch.
    pub cache_dir: PathBuf,
    pub base_url: Option<String>,
    pub deployment_url: Option<String>,
    pub fetch_timeout_secs: u64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Noto Sans".to_string(),
            regular_file: "NotoSans-Regular.ttf".to_string(),
            bold_file: "NotoSans-Bold.ttf".to_string(),
            local_dir: PathBuf::from("assets/fonts"),
            cache_dir: std::env::temp_dir().join("feedback-pdf-fonts"),
            base_url: None,
            deployment_url: None,
            fetch_timeout_secs: 15,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FontConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.base_url = non_empty_env(BASE_URL_ENV);
        config.deployment_url = non_empty_env(DEPLOYMENT_URL_ENV);
        if let Some(dir) = non_empty_env(FONT_DIR_ENV) {
            config.local_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Origin the fonts are fetched from: the configured URL, then the
    /// platform deployment URL, then the hardcoded fallback.
    pub fn resolve_base_url(&self) -> String {
        let base = if let Some(url) = &self.base_url {
            url.clone()
        } else if let Some(host) = &self.deployment_url {
            if host.contains("://") {
                host.clone()
            } else {
                format!("https://{}", host)
            }
        } else {
            FALLBACK_BASE_URL.to_string()
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn font_url(&self, base: &str, file: &str) -> String {
        format!("{}/fonts/{}", base, file)
    }

    pub fn local_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.local_dir.join(&self.regular_file),
            self.local_dir.join(&self.bold_file),
        )
    }

    pub fn cache_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.cache_dir.join(&self.regular_file),
            self.cache_dir.join(&self.bold_file),
        )
    }
}
