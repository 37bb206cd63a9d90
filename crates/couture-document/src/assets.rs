// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Asset resolution — load the brand logo and customer photos as decoded
// rasters.
//
// Failure is an expected outcome here, not an error path: a missing file, a
// dead link, a slow server, or a corrupt upload all come back as a
// `ResolutionFailure` that the section composer replaces with a visual
// fallback. Remote fetches are bounded by a timeout.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use couture_core::DocumentConfig;
use couture_core::error::{CoutureError, Result};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::image::DecodedImage;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetRef {
    /// Path relative to the injected [`AssetRoot`].
    Local(PathBuf),
    /// `http://` or `https://` URL.
    Remote(String),
}

impl AssetRef {
    /// Classify a stored reference: URLs become `Remote`, anything else is a
    /// local path.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }
}

/// Why an asset could not be turned into an image.
#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("asset path escapes the asset root: {0}")]
    OutsideRoot(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("network error fetching {url}: {detail}")]
    Network { url: String, detail: String },

    #[error("fetching {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("could not decode image from {origin}: {detail}")]
    Decode { origin: String, detail: String },
}

/// Directory local asset references are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoot(PathBuf);

impl AssetRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Join a relative reference onto the root. Absolute paths and `..`
    /// components are refused so a stored reference cannot read arbitrary
    /// files.
    pub fn locate(&self, relative: &Path) -> std::result::Result<PathBuf, ResolutionFailure> {
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(ResolutionFailure::OutsideRoot(relative.to_path_buf()));
        }
        Ok(self.0.join(relative))
    }
}

/// Turns an [`AssetRef`] into decoded image data.
pub trait AssetResolver: Send + Sync {
    fn resolve(
        &self,
        asset: &AssetRef,
    ) -> impl Future<Output = std::result::Result<DecodedImage, ResolutionFailure>> + Send;
}

// -- Filesystem + HTTP loader -------------------------------------------------

/// Default resolver: local files under an [`AssetRoot`], remote files over
/// HTTP with a hard timeout.
pub struct AssetLoader {
    root: AssetRoot,
    client: reqwest::Client,
    timeout: Duration,
}

impl AssetLoader {
    pub fn new(root: AssetRoot, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoutureError::InvalidConfig(format!("HTTP client: {err}")))?;
        Ok(Self {
            root,
            client,
            timeout,
        })
    }

    /// Build a loader from the asset root and fetch timeout in `config`.
    pub fn from_config(config: &DocumentConfig) -> Result<Self> {
        Self::new(AssetRoot::new(&config.asset_root), config.fetch_timeout())
    }

    async fn load_local(&self, relative: &Path) -> std::result::Result<Vec<u8>, ResolutionFailure> {
        let path = self.root.locate(relative)?;
        tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ResolutionFailure::NotFound(path.clone())
            } else {
                ResolutionFailure::Io {
                    path: path.clone(),
                    source,
                }
            }
        })
    }

    async fn load_remote(&self, url: &str) -> std::result::Result<Vec<u8>, ResolutionFailure> {
        tokio::time::timeout(self.timeout, self.fetch(url))
            .await
            .map_err(|_| ResolutionFailure::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            })?
    }

    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, ResolutionFailure> {
        let network = |err: reqwest::Error| {
            if err.is_timeout() {
                ResolutionFailure::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                }
            } else {
                ResolutionFailure::Network {
                    url: url.to_string(),
                    detail: err.to_string(),
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionFailure::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(network)?;
        debug!(url, bytes = body.len(), "remote asset fetched");
        Ok(body.to_vec())
    }
}

impl AssetResolver for AssetLoader {
    #[instrument(skip(self), fields(asset = %asset.describe()))]
    async fn resolve(&self, asset: &AssetRef) -> std::result::Result<DecodedImage, ResolutionFailure> {
        let bytes = match asset {
            AssetRef::Local(path) => self.load_local(path).await?,
            AssetRef::Remote(url) => self.load_remote(url).await?,
        };
        let image = DecodedImage::from_bytes(&bytes).map_err(|err| ResolutionFailure::Decode {
            origin: asset.describe(),
            detail: err.to_string(),
        })?;
        info!(width = image.width, height = image.height, "asset resolved");
        Ok(image)
    }
}

// -- In-memory resolver -------------------------------------------------------

/// Resolver over images the caller already holds, e.g. loaded from a
/// database blob. Unknown references resolve to `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct PreloadedAssets {
    images: HashMap<AssetRef, DecodedImage>,
}

impl PreloadedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: AssetRef, image: DecodedImage) {
        self.images.insert(asset, image);
    }

    pub fn with(mut self, asset: AssetRef, image: DecodedImage) -> Self {
        self.insert(asset, image);
        self
    }
}

impl AssetResolver for PreloadedAssets {
    async fn resolve(&self, asset: &AssetRef) -> std::result::Result<DecodedImage, ResolutionFailure> {
        self.images
            .get(asset)
            .cloned()
            .ok_or_else(|| ResolutionFailure::NotFound(PathBuf::from(asset.describe())))
    }
}

/// One-shot HTTP server for resolver tests.
#[cfg(test)]
pub(crate) mod test_server {
    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer the first request with a bodiless `404 Not Found`.
    pub async fn not_found() -> (SocketAddr, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                    .await;
                let _ = socket.shutdown().await;
            }
        });
        (addr, server)
    }
}
