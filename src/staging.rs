use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const UPLOAD_FILE_NAME: &str = "upload.png";
const DOWNLOAD_FILE_NAME: &str = "downloaded_image.png";

/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Root under which every request gets its own scratch directory.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn prepare(&self) -> Result<StagedRequest> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());
        tokio::fs::create_dir_all(&dir).await?;
        debug!("Staging request {} in {}", id, dir.display());
        Ok(StagedRequest { id, dir })
    }
}

/// Request-scoped scratch directory, removed when dropped.
#[derive(Debug)]
pub struct StagedRequest {
    id: Uuid,
    dir: PathBuf,
}

impl StagedRequest {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn upload_path(&self) -> PathBuf {
        self.dir.join(UPLOAD_FILE_NAME)
    }

    pub fn download_path(&self) -> PathBuf {
        self.dir.join(DOWNLOAD_FILE_NAME)
    }

    pub async fn save_upload(&self, upload: &UploadedFile) -> Result<PathBuf> {
        let path = self.upload_path();
        tokio::fs::write(&path, &upload.bytes).await?;
        debug!(
            "Saved upload '{}' ({} bytes) for request {}",
            upload.file_name,
            upload.bytes.len(),
            self.id
        );
        Ok(path)
    }
}

impl Drop for StagedRequest {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => debug!("Cleaned up staging for request {}", self.id),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to clean up staging directory {}: {}",
                self.dir.display(),
                e
            ),
        }
    }
}
