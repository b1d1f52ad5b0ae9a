use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A result file produced by a remote service.
///
/// Files fetched into the download cache own their scratch directory, which
/// is removed when the value is dropped. Files that already live elsewhere are
/// left untouched.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl OutputFile {
    pub fn cached(scratch_dir: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scratch_dir: Some(scratch_dir.into()),
        }
    }

    pub fn external(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scratch_dir: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        let Some(dir) = &self.scratch_dir else {
            return;
        };
        match std::fs::remove_dir_all(dir) {
            Ok(()) => debug!("Removed cached output {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove cached output {}: {}", dir.display(), e),
        }
    }
}
