//! Font provisioning for feedback reports.
//!
//! The report family must cover scripts the standard PDF fonts cannot, so
//! its regular and bold files are located at runtime:
//!
//! 1. bundled files under [`FontConfig::local_dir`]
//! 2. the temp cache written by a previous fetch
//! 3. `GET {base}/fonts/{file}` for both weights, concurrently
//!
//! The result is registered once per process; see [`FontProvisioner`].

pub mod asset;
pub mod config;
pub mod error;
pub mod fetch;
pub mod provision;
pub mod registry;

pub use asset::{FontAsset, FontOrigin, SharedFontData, validate_font};
pub use config::FontConfig;
pub use error::FontError;
pub use fetch::{FontFetcher, HttpFontFetcher};
pub use provision::{FontProvisioner, ResolutionState, global};
pub use registry::{Hyphenator, RegisteredFamily, no_hyphenation};
