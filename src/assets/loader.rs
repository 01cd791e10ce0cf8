use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::source::{AssetSource, with_cache_buster};
use crate::foundation::error::{AdframeError, AdframeResult};

/// Whether a fetch may be served from an intermediate cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Plain request.
    Cached,
    /// Force a fresh copy (remote URLs get a cache-busting query parameter).
    Fresh,
}

/// Async source of encoded image bytes.
///
/// The compositor only ever holds one loader; implementations decide how each
/// [`AssetSource`] variant is resolved. Dropping the returned future cancels the fetch.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Fetch the encoded bytes behind `source`.
    async fn fetch(&self, source: &AssetSource, policy: FetchPolicy) -> AdframeResult<Vec<u8>>;
}

/// Parse `source`, fetch it through `loader` and decode it.
pub async fn load_image<L>(
    loader: &L,
    source: &str,
    policy: FetchPolicy,
) -> AdframeResult<PreparedImage>
where
    L: AssetLoader + ?Sized,
{
    let parsed = AssetSource::parse(source)?;
    let bytes = loader.fetch(&parsed, policy).await?;
    decode_image(&bytes)
}

/// Options for [`HttpAssetLoader`].
#[derive(Clone, Debug)]
pub struct LoaderOpts {
    /// `User-Agent` header sent with remote fetches.
    pub user_agent: String,
    /// Whole-request timeout for remote fetches.
    pub timeout: Duration,
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            user_agent: concat!("adframe/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Loader backed by plain HTTP(S) GET, inline data URIs and the local filesystem.
pub struct HttpAssetLoader {
    client: reqwest::Client,
}

impl HttpAssetLoader {
    /// Build a loader with its own HTTP client.
    pub fn new(opts: LoaderOpts) -> AdframeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(opts.user_agent)
            .timeout(opts.timeout)
            .build()
            .map_err(|e| AdframeError::asset(format!("HTTP client error: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AssetLoader for HttpAssetLoader {
    async fn fetch(&self, source: &AssetSource, policy: FetchPolicy) -> AdframeResult<Vec<u8>> {
        match source {
            AssetSource::Http(url) => {
                let url = match policy {
                    FetchPolicy::Cached => url.clone(),
                    FetchPolicy::Fresh => with_cache_buster(url, rand::random::<u64>()),
                };
                tracing::debug!(%url, "fetching remote asset");
                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| AdframeError::asset(format!("failed to download {url}: {e}")))?;
                if !response.status().is_success() {
                    return Err(AdframeError::asset(format!(
                        "failed to download {url}: HTTP {}",
                        response.status()
                    )));
                }
                let bytes = response.bytes().await.map_err(|e| {
                    AdframeError::asset(format!("failed to read body of {url}: {e}"))
                })?;
                Ok(bytes.to_vec())
            }
            AssetSource::Data { bytes, .. } => Ok(bytes.to_vec()),
            AssetSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                AdframeError::asset(format!("failed to read asset '{}': {e}", path.display()))
            }),
        }
    }
}

/// In-memory loader for tests, offline previews and debugging.
///
/// Remote URLs and file paths are looked up verbatim (no cache-busting is applied, so fresh
/// fetches return the same bytes). Data URIs resolve to their own payload.
#[derive(Default)]
pub struct MemoryAssetLoader {
    entries: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
    log: Mutex<Vec<(String, FetchPolicy)>>,
}

impl MemoryAssetLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a URL or path.
    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.entries.insert(key.into(), bytes);
        self
    }

    /// Make fetches of `key` wait for `delay` before resolving.
    pub fn delay(&mut self, key: impl Into<String>, delay: Duration) -> &mut Self {
        self.delays.insert(key.into(), delay);
        self
    }

    /// Every fetch issued so far, in call order.
    pub fn fetch_log(&self) -> Vec<(String, FetchPolicy)> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AssetLoader for MemoryAssetLoader {
    async fn fetch(&self, source: &AssetSource, policy: FetchPolicy) -> AdframeResult<Vec<u8>> {
        let key = match source {
            AssetSource::Data { bytes, .. } => return Ok(bytes.to_vec()),
            AssetSource::Http(url) => url.clone(),
            AssetSource::File(path) => path.to_string_lossy().into_owned(),
        };
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key.clone(), policy));

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| AdframeError::asset(format!("no in-memory asset for '{key}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
