//! Photo capture adapter.
//!
//! The camera itself is external; the directory only needs a still image on
//! demand. `FileCapture` stands in for a webcam by reading an image file.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use userdir_core::Photo;

/// File name given to stills that do not carry one
pub const DEFAULT_CAPTURE_NAME: &str = "webcam-photo.jpg";

/// Produces a still image on demand.
#[async_trait]
pub trait PhotoCapture: Send {
    /// Capture a still.
    ///
    /// Fails with [`ClientError::CaptureCancelled`] once `cancel` was called.
    async fn capture(&mut self) -> Result<Photo>;

    /// Abandon capturing.
    fn cancel(&mut self);
}

/// Capture source backed by an image file on disk.
#[derive(Debug, Clone)]
pub struct FileCapture {
    path: PathBuf,
    cancelled: bool,
}

impl FileCapture {
    /// Capture from the given image file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cancelled: false,
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Allow capturing again after a cancel
    pub fn rearm(&mut self) {
        self.cancelled = false;
    }
}

#[async_trait]
impl PhotoCapture for FileCapture {
    async fn capture(&mut self) -> Result<Photo> {
        if self.cancelled {
            return Err(ClientError::CaptureCancelled);
        }

        if !self.path.exists() {
            return Err(ClientError::FileNotFound(self.path.display().to_string()));
        }

        debug!(file = %self.path.display(), "Capturing photo");
        let bytes = tokio::fs::read(&self.path).await?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_CAPTURE_NAME)
            .to_string();

        let photo = Photo::new(bytes, file_name, mime_type_for_file(&self.path));
        info!(file = %photo.file_name, size = photo.len(), "Photo captured");

        Ok(photo)
    }

    fn cancel(&mut self) {
        debug!(file = %self.path.display(), "Capture cancelled");
        self.cancelled = true;
    }
}

/// Get MIME type for an image file.
pub fn mime_type_for_file(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
