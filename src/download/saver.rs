//! Saving fetched image bytes.
//!
//! The save target sits behind the [`ImageSaver`] trait so the download
//! engine stays independent of where bytes land (a directory on disk here;
//! other environments can plug in their own sink).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::error::DownloadError;

/// Default filename for downloaded images.
pub const DEFAULT_IMAGE_FILENAME: &str = "downloaded-image.jpg";

/// Sink for downloaded image bytes.
#[async_trait]
pub trait ImageSaver: Send + Sync {
    /// Persists `bytes` under `filename`, returning the final location.
    ///
    /// Implementations must not overwrite existing data; a colliding name
    /// resolves to a fresh location.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] when persisting fails.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError>;
}

/// Saves images as files under an output directory.
#[derive(Debug, Clone)]
pub struct FileSaver {
    output_dir: PathBuf,
}

impl FileSaver {
    /// Creates a saver targeting `output_dir`; the directory is created on
    /// first save.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ImageSaver for FileSaver {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DownloadError::io(self.output_dir.clone(), e))?;

        let path = resolve_unique_path(&self.output_dir, filename);
        debug!(path = %path.display(), "resolved save path");

        let mut file = File::create(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        Ok(path)
    }
}

/// Resolves a path under `dir` that does not collide with an existing file.
///
/// Duplicates get numeric suffixes before the extension:
/// `downloaded-image.jpg`, then `downloaded-image_2.jpg`,
/// `downloaded-image_3.jpg`, ...
fn resolve_unique_path(dir: &Path, filename: &str) -> PathBuf {
    let base_path = dir.join(filename);
    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) => (&filename[..pos], &filename[pos..]),
        None => (filename, ""),
    };

    for i in 2..1000 {
        let candidate = dir.join(format!("{stem}_{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    // Fallback (extremely unlikely)
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}_{timestamp}{ext}"))
}
