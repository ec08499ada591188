/// Captured photo payload
use crate::error::{CoreError, Result};
use std::fmt;

/// Largest photo the backend accepts, in bytes
pub const MAX_PHOTO_BYTES: usize = 5_000_000;

/// A captured still image, uploaded alongside a draft.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// File name sent with the multipart part
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub content_type: String,
}

impl Photo {
    /// Create a photo from raw bytes
    pub fn new(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Apply the same checks the backend runs on uploads.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(CoreError::invalid_photo("photo is empty"));
        }
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err(CoreError::invalid_photo(format!(
                "photo is {} bytes, limit is {}",
                self.bytes.len(),
                MAX_PHOTO_BYTES
            )));
        }
        if !self.content_type.starts_with("image/") {
            return Err(CoreError::invalid_photo(format!(
                "content type {} is not an image",
                self.content_type
            )));
        }
        Ok(())
    }
}

// Bytes are elided so drafts can be logged
impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
