//! On-disk storage for generated QR images.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use medstock_core::{encode_png, MedicineLabel};

use crate::error::AppError;

/// URL prefix the QR directory is served under.
pub const URL_PREFIX: &str = "/qr";

/// Writes and removes QR images inside a single directory.
#[derive(Debug, Clone)]
pub struct CodeStore {
    dir: PathBuf,
}

impl CodeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the image directory if it is missing.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Renders `label` to a PNG and writes it under a fresh timestamped name.
    ///
    /// Returns the path of the written file.
    pub async fn write(&self, label: &MedicineLabel<'_>) -> Result<PathBuf, AppError> {
        let png = encode_png(&label.text())?;
        let path = self.dir.join(label.file_name(Local::now().naive_local()));
        tokio::fs::write(&path, png).await?;
        Ok(path)
    }

    /// Removes an image. Returns `false` when the file was already gone.
    pub async fn remove(&self, path: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Removes an image, logging instead of failing.
    pub async fn discard(&self, path: &str) {
        if let Err(e) = self.remove(path).await {
            tracing::warn!(path, error = %e, "failed to remove QR image");
        }
    }

    /// Browser URL for a stored image path.
    pub fn url_for(path: &str) -> Option<String> {
        let file_name = Path::new(path).file_name()?.to_str()?;
        Some(format!("{}/{}", URL_PREFIX, file_name))
    }
}
