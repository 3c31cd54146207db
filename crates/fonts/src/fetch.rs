//! FontFetcher trait for abstracting remote font downloads.

use crate::error::FontError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Downloads one font file.
///
/// Implementations must treat any non-success status as an error; the
/// provisioner never retries.
#[async_trait]
pub trait FontFetcher: Send + Sync + Debug {
    /// Fetch the bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FontError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Fetches fonts over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFontFetcher {
    client: reqwest::Client,
}

impl HttpFontFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FontError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FontError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FontFetcher for HttpFontFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FontError> {
        log::debug!("Fetching font {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FontError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FontError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FontError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(FontError::EmptyPayload {
                url: url.to_string(),
            });
        }
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "HttpFontFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_built_with_timeout() {
        let fetcher = HttpFontFetcher::new(Duration::from_secs(15)).unwrap();
        assert_eq!(fetcher.name(), "HttpFontFetcher");
    }
}
