use crate::{Error, Result, config::FetchConfig};
use std::{path::Path, time::Duration};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Streams a remote image to a local file.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `url` into `dest`, returning the number of bytes written.
    ///
    /// Any status other than 200 is a download failure. A partially written
    /// file is removed so callers can rely on `dest` existing only on success.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::download("Image URL cannot be empty"));
        }

        let mut response = self.client.get(url).send().await.map_err(|e| {
            warn!("Error downloading image from {}: {}", url, e);
            Error::download(format!("Error downloading image: {}", e))
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Failed to download image. Status code: {}", status);
            return Err(Error::download(format!(
                "Failed to download image. Status code: {}",
                status.as_u16()
            )));
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    file.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }
                Ok(None) => break,
                Err(e) => {
                    drop(file);
                    let _ = tokio::fs::remove_file(dest).await;
                    warn!("Image download from {} interrupted: {}", url, e);
                    return Err(Error::download(format!("Error downloading image: {}", e)));
                }
            }
        }
        file.flush().await?;

        info!("Image downloaded successfully and saved as {}", dest.display());
        Ok(written)
    }
}
