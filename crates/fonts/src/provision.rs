//! Resolves the report font family and registers it once per process.
//!
//! Resolution tries the bundled files, then the temp cache written by an
//! earlier fetch, then downloads both weights from the resolved origin.
//! Files that do not parse as fonts are skipped, and a download that does
//! not parse fails the attempt without touching the cache.
//! Registration is a lazily initialized singleton, so concurrent cold-start
//! conversions share one resolution attempt instead of racing on the cache.

use crate::asset::{FontAsset, FontOrigin, validate_font};
use crate::config::FontConfig;
use crate::error::FontError;
use crate::fetch::{FontFetcher, HttpFontFetcher};
use crate::registry::RegisteredFamily;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Progress of the provisioning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    LocalFound,
    CacheFound,
    Fetching,
    Fetched,
    Failed,
    /// Terminal. Further calls return the registered family untouched.
    Registered,
}

#[derive(Debug)]
pub struct FontProvisioner {
    config: FontConfig,
    fetcher: Arc<dyn FontFetcher>,
    registered: OnceCell<Arc<RegisteredFamily>>,
    state: Mutex<ResolutionState>,
}

impl FontProvisioner {
    /// A provisioner fetching over HTTP with the configured timeout.
    pub fn new(config: FontConfig) -> Result<Self, FontError> {
        let fetcher = Arc::new(HttpFontFetcher::new(config.fetch_timeout())?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: FontConfig, fetcher: Arc<dyn FontFetcher>) -> Self {
        Self {
            config,
            fetcher,
            registered: OnceCell::new(),
            state: Mutex::new(ResolutionState::Unresolved),
        }
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    pub fn state(&self) -> ResolutionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, next: ResolutionState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        log::trace!("Font provisioning {:?} -> {:?}", *state, next);
        *state = next;
    }

    /// The registered family, if provisioning already succeeded.
    pub fn registered(&self) -> Option<Arc<RegisteredFamily>> {
        self.registered.get().cloned()
    }

    /// Resolves and registers the family on first use.
    ///
    /// A failed attempt leaves nothing registered, so a later call retries
    /// from the filesystem probes.
    pub async fn ensure_registered(&self) -> Result<Arc<RegisteredFamily>, FontError> {
        let family = self
            .registered
            .get_or_try_init(|| async {
                let asset = self.resolve().await?;
                log::info!(
                    "Registered font family '{}' from {:?}",
                    asset.family,
                    asset.origin
                );
                Ok::<_, FontError>(Arc::new(RegisteredFamily::new(asset)))
            })
            .await?;
        self.set_state(ResolutionState::Registered);
        Ok(Arc::clone(family))
    }

    async fn resolve(&self) -> Result<FontAsset, FontError> {
        self.set_state(ResolutionState::Unresolved);

        let (regular, bold) = self.config.local_paths();
        if let Some((r, b)) = read_valid_pair(&regular, &bold).await? {
            self.set_state(ResolutionState::LocalFound);
            return Ok(FontAsset::new(
                self.config.family.clone(),
                r,
                b,
                FontOrigin::Local(self.config.local_dir.clone()),
            ));
        }

        let (regular, bold) = self.config.cache_paths();
        if let Some((r, b)) = read_valid_pair(&regular, &bold).await? {
            self.set_state(ResolutionState::CacheFound);
            return Ok(FontAsset::new(
                self.config.family.clone(),
                r,
                b,
                FontOrigin::Cache(self.config.cache_dir.clone()),
            ));
        }

        self.set_state(ResolutionState::Fetching);
        match self.fetch_remote().await {
            Ok(asset) => {
                self.set_state(ResolutionState::Fetched);
                Ok(asset)
            }
            Err(e) => {
                log::error!("Font resolution failed: {}", e);
                self.set_state(ResolutionState::Failed);
                Err(e)
            }
        }
    }

    async fn fetch_remote(&self) -> Result<FontAsset, FontError> {
        let base = self.config.resolve_base_url();
        let regular_url = self.config.font_url(&base, &self.config.regular_file);
        let bold_url = self.config.font_url(&base, &self.config.bold_file);
        log::info!(
            "Fetching font family '{}' from {} via {}",
            self.config.family,
            base,
            self.fetcher.name()
        );

        let (regular, bold) = tokio::try_join!(
            self.fetcher.fetch(&regular_url),
            self.fetcher.fetch(&bold_url)
        )?;
        // Nothing unparsable reaches the cache or the registration.
        validate_font(&regular, &regular_url)?;
        validate_font(&bold, &bold_url)?;

        if let Err(e) = self.write_cache(&regular, &bold).await {
            log::warn!(
                "Could not cache fonts in {}: {}",
                self.config.cache_dir.display(),
                e
            );
        }

        Ok(FontAsset::new(
            self.config.family.clone(),
            regular,
            bold,
            FontOrigin::Remote(base),
        ))
    }

    async fn write_cache(&self, regular: &[u8], bold: &[u8]) -> Result<(), FontError> {
        tokio::fs::create_dir_all(&self.config.cache_dir).await?;
        let (regular_path, bold_path) = self.config.cache_paths();
        write_atomic(&regular_path, regular).await?;
        write_atomic(&bold_path, bold).await?;
        log::debug!("Cached fonts in {}", self.config.cache_dir.display());
        Ok(())
    }
}

async fn both_exist(regular: &Path, bold: &Path) -> bool {
    let regular = tokio::fs::try_exists(regular).await.unwrap_or(false);
    let bold = tokio::fs::try_exists(bold).await.unwrap_or(false);
    regular && bold
}

/// Reads both files when both exist and parse as fonts.
///
/// An unparsable pair is skipped with a warning so the next source is tried.
async fn read_valid_pair(
    regular: &Path,
    bold: &Path,
) -> Result<Option<(Vec<u8>, Vec<u8>)>, FontError> {
    if !both_exist(regular, bold).await {
        return Ok(None);
    }
    let r = read_font(regular).await?;
    let b = read_font(bold).await?;
    let valid = validate_font(&r, &regular.display().to_string())
        .and_then(|_| validate_font(&b, &bold.display().to_string()));
    match valid {
        Ok(()) => Ok(Some((r, b))),
        Err(e) => {
            log::warn!("Skipping font files: {}", e);
            Ok(None)
        }
    }
}

async fn read_font(path: &Path) -> Result<Vec<u8>, FontError> {
    tokio::fs::read(path).await.map_err(|e| FontError::Read {
        path: PathBuf::from(path),
        message: e.to_string(),
    })
}

/// Writes next to `path` and renames into place, so a reader never sees a
/// partially written file.
async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), FontError> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(format!(".{}.part", std::process::id()));
    let partial = PathBuf::from(partial);

    if let Err(e) = tokio::fs::write(&partial, data).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    tokio::fs::rename(&partial, path).await?;
    Ok(())
}

static GLOBAL: Lazy<Result<Arc<FontProvisioner>, FontError>> =
    Lazy::new(|| FontProvisioner::new(FontConfig::from_env()).map(Arc::new));

/// Process-wide provisioner configured from the environment. Every caller
/// shares its registration.
pub fn global() -> Result<Arc<FontProvisioner>, FontError> {
    GLOBAL.as_ref().map(Arc::clone).map_err(Clone::clone)
}
