use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory served to the front-end as static files.
#[derive(Debug, Clone)]
pub struct PublicDir {
    root: PathBuf,
}

impl PublicDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Copies `source` into the directory under its own file name, replacing
    /// any earlier copy.
    pub async fn publish(&self, source: &Path) -> Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| {
            Error::internal(format!("Result path has no file name: {}", source.display()))
        })?;

        tokio::fs::create_dir_all(&self.root).await?;
        let destination = self.root.join(file_name);
        tokio::fs::copy(source, &destination).await?;

        info!("Published {} to {}", source.display(), destination.display());
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_publish_keeps_file_name() {
        let public = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let source = scratch.path().join("result.webp");
        std::fs::write(&source, b"image").unwrap();

        let dir = PublicDir::new(public.path());
        let published = dir.publish(&source).await.unwrap();

        assert_eq!(published, public.path().join("result.webp"));
        assert_eq!(std::fs::read(published).unwrap(), b"image");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_publish_overwrites_previous_copy() {
        let public = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let source = scratch.path().join("image.png");
        let dir = PublicDir::new(public.path());

        std::fs::write(&source, b"first").unwrap();
        dir.publish(&source).await.unwrap();
        std::fs::write(&source, b"second").unwrap();
        let published = dir.publish(&source).await.unwrap();

        assert_eq!(std::fs::read(published).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_publish_missing_source_fails() {
        let public = TempDir::new().unwrap();
        let dir = PublicDir::new(public.path());

        let result = dir.publish(Path::new("/nonexistent/result.png")).await;

        assert!(result.is_err());
        assert!(!public.path().join("result.png").exists());
    }
}
