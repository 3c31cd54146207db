use std::path::PathBuf;
use thiserror::Error;

/// Error type for font provisioning.
///
/// Every variant is fatal for the conversion that triggered provisioning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("Font fetch from '{url}' returned HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("Font request to '{url}' failed: {message}")]
    Http { url: String, message: String },

    #[error("Font fetch from '{url}' returned an empty payload")]
    EmptyPayload { url: String },

    #[error("'{location}' is not a usable font file: {message}")]
    InvalidFont { location: String, message: String },

    #[error("Failed to read font file '{path}': {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::Io(err.to_string())
    }
}
