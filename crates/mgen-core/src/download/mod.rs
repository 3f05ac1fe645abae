//! Download agent: fetch the image behind an output URL and save it locally.
//!
//! Synthesized render URLs and external image URLs are treated the same way:
//! one GET, then one save. The URL is an owned snapshot taken when the download
//! starts, so later selection changes do not affect it.

mod target;

pub use target::{DirectoryTarget, SaveTarget};

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{HttpConfig, MgenConfig};
use crate::http::{self, FetchError};

/// Image bytes held only between fetch and save.
#[derive(Debug)]
pub struct DownloadedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub url: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no image URL to download")]
    MissingUrl,
    #[error("image fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("saving image failed: {0}")]
    Save(#[from] std::io::Error),
    #[error("download task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Fetches `url` into memory under the suggested `filename`.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_image(
    url: &str,
    filename: &str,
    opts: &HttpConfig,
) -> Result<DownloadedImage, DownloadError> {
    if url.trim().is_empty() {
        return Err(DownloadError::MissingUrl);
    }
    let bytes = http::get_bytes(url.trim(), opts)?;
    Ok(DownloadedImage {
        bytes,
        filename: filename.to_string(),
    })
}

#[derive(Clone)]
pub struct DownloadAgent {
    http: HttpConfig,
    filename: String,
    target: Arc<dyn SaveTarget>,
}

impl DownloadAgent {
    pub fn new(cfg: &MgenConfig, target: Arc<dyn SaveTarget>) -> Self {
        Self {
            http: cfg.http,
            filename: cfg.download_filename.clone(),
            target,
        }
    }

    /// Fetches and saves the image at `url` in the current thread.
    pub fn download_blocking(&self, url: &str) -> Result<SavedImage, DownloadError> {
        let image = fetch_image(url, &self.filename, &self.http)?;
        let size = image.bytes.len() as u64;
        let path = self.target.save(&image.filename, &image.bytes)?;
        drop(image);
        tracing::info!("saved {} ({} bytes) from {}", path.display(), size, url);
        Ok(SavedImage {
            url: url.to_string(),
            path,
            size,
        })
    }

    /// Fetches and saves the image at `url` on the blocking pool.
    pub async fn download(&self, url: impl Into<String>) -> Result<SavedImage, DownloadError> {
        let url = url.into();
        if url.trim().is_empty() {
            tracing::warn!("download requested without an image URL");
            return Err(DownloadError::MissingUrl);
        }
        let agent = self.clone();
        let result = tokio::task::spawn_blocking(move || agent.download_blocking(&url)).await?;
        if let Err(e) = &result {
            tracing::warn!("download failed: {}", e);
        }
        result
    }
}

impl std::fmt::Debug for DownloadAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadAgent")
            .field("http", &self.http)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}
