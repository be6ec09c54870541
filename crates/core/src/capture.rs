//! Photo acquisition.
//!
//! The camera itself lives outside this crate: whatever device or picker the
//! platform offers hands us an encoded still frame, and this module turns
//! that frame into a validated, decoded photo the rest of the pipeline can
//! work with.
//!
//! # Example
//!
//! ```ignore
//! use mood_melody_core::capture::CapturedPhoto;
//!
//! let photo = CapturedPhoto::from_path("selfie.jpg")?;
//! let payload = photo.to_base64_jpeg()?;
//! ```

use crate::error::{AppError, Result};
use crate::image_processing::ImageProcessor;
use image::DynamicImage;
use std::fmt;
use std::fs;
use std::path::Path;

/// A decoded still frame captured by the user.
///
/// Once constructed, the photo is immutable; encoding for upload produces a
/// new value and leaves the original untouched.
#[derive(Clone)]
pub struct CapturedPhoto {
    image: DynamicImage,
}

impl CapturedPhoto {
    /// Loads and decodes a photo from a file on disk.
    ///
    /// The format is detected from the file contents, not the extension.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Photo`] if the file cannot be read or does not
    /// decode to a non-empty image.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| AppError::photo(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    /// Decodes a photo from an in-memory encoded frame.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Photo`] if the bytes do not decode to a non-empty
    /// image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| AppError::photo(format!("Failed to decode photo: {}", e)))?;
        Self::from_image(image)
    }

    /// Wraps an already-decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Photo`] if the image has zero width or height.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AppError::photo("Captured frame is empty"));
        }
        Ok(Self { image })
    }

    /// Returns the decoded image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Returns the photo dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Encodes the photo for transmission to the Gemini API.
    ///
    /// Delegates to [`ImageProcessor::prepare_for_upload`], which bounds the
    /// resolution and produces a Base64 JPEG string.
    pub fn to_base64_jpeg(&self) -> Result<String> {
        ImageProcessor::prepare_for_upload(&self.image)
    }
}

impl fmt::Debug for CapturedPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedPhoto")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_image_accepts_non_empty_frame() {
        let photo = CapturedPhoto::from_image(DynamicImage::new_rgb8(32, 24)).unwrap();
        assert_eq!(photo.dimensions(), (32, 24));
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = CapturedPhoto::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, AppError::Photo(_)));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = CapturedPhoto::from_path("/nonexistent/selfie.jpg").unwrap_err();
        assert!(matches!(err, AppError::Photo(_)));
    }
}
