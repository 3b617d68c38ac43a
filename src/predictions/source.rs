use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::error::LoadError;

/// Where a predictions document is read from.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Retrieve the raw document body. One request, no retry.
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Human-readable location for logging.
    fn location(&self) -> &str;
}

/// Pick a source for a configured location: `http(s)://` URLs are fetched
/// over HTTP, `file://` URLs and everything else are read from disk
/// (relative paths resolve against the working directory).
pub fn source_for(location: &str) -> Result<Arc<dyn PredictionSource>> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok(Arc::new(HttpSource::new(url)?))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| anyhow::anyhow!("Invalid file URL: {}", location))?;
            Ok(Arc::new(FileSource::new(path)))
        }
        _ => Ok(Arc::new(FileSource::new(PathBuf::from(location)))),
    }
}

/// Predictions published behind an HTTP endpoint (e.g. blob storage).
pub struct HttpSource {
    http: Client,
    url: Url,
    label: String,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpSource {
            http,
            label: url.to_string(),
            url,
        })
    }
}

#[async_trait]
impl PredictionSource for HttpSource {
    fn location(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        debug!("Fetching predictions from {}", self.url);

        let resp = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Fetch {
                location: self.label.clone(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(LoadError::BadStatus {
                location: self.label.clone(),
                status: resp.status().as_u16(),
            });
        }

        resp.text().await.map_err(|e| LoadError::Fetch {
            location: self.label.clone(),
            reason: e.to_string(),
        })
    }
}

/// Predictions file on local disk.
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        FileSource {
            label: path.display().to_string(),
            path,
        }
    }
}

#[async_trait]
impl PredictionSource for FileSource {
    fn location(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        debug!("Reading predictions from {}", self.label);
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Fetch {
                location: self.label.clone(),
                reason: e.to_string(),
            })
    }
}
