//! Image processing and encoding utilities.
//!
//! This module prepares captured photos for transmission to the Gemini API:
//! the resolution is bounded so a full-resolution camera frame does not blow
//! up the request payload, and the result is encoded as a Base64 JPEG.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::io::Cursor;

/// Longest edge allowed in an uploaded photo, in pixels.
pub const MAX_UPLOAD_DIMENSION: u32 = 1024;

/// Image processing utilities for the analysis workflow.
///
/// This struct provides static methods for processing captured photos
/// before sending them to the Gemini API.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Bounds a photo's resolution and encodes it to Base64.
    ///
    /// Photos whose longest edge exceeds [`MAX_UPLOAD_DIMENSION`] are scaled
    /// down proportionally; smaller photos are passed through unchanged.
    ///
    /// # Arguments
    ///
    /// * `original` - The captured photo at full resolution
    ///
    /// # Returns
    ///
    /// A Base64-encoded JPEG string ready for API transmission.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Photo`] if the photo has zero area or JPEG
    /// encoding fails.
    pub fn prepare_for_upload(original: &DynamicImage) -> Result<String> {
        if original.width() == 0 || original.height() == 0 {
            return Err(AppError::photo("Photo has zero area"));
        }

        let (width, height) = bounded_dimensions(original.width(), original.height());

        if width == original.width() && height == original.height() {
            return Self::encode_to_base64_jpeg(original);
        }

        let resized = original.resize_exact(width, height, FilterType::Triangle);
        Self::encode_to_base64_jpeg(&resized)
    }

    /// Encodes a DynamicImage to a Base64 JPEG string.
    fn encode_to_base64_jpeg(image: &DynamicImage) -> Result<String> {
        let mut buffer: Vec<u8> = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        // The JPEG encoder only takes 8-bit luma/RGB; flatten everything else
        let encodable = match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image.clone(),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        };

        encodable
            .write_to(&mut cursor, ImageFormat::Jpeg)
            .map_err(|e| AppError::photo(format!("Failed to encode photo: {}", e)))?;

        Ok(BASE64.encode(buffer))
    }
}

/// Scales (width, height) so the longest edge fits [`MAX_UPLOAD_DIMENSION`],
/// preserving aspect ratio. Dimensions already within the bound are returned
/// unchanged.
fn bounded_dimensions(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_UPLOAD_DIMENSION {
        return (width, height);
    }

    let scale = |edge: u32| -> u32 {
        let scaled = edge as u64 * MAX_UPLOAD_DIMENSION as u64 / longest as u64;
        (scaled as u32).max(1)
    };

    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_photos_keep_their_dimensions() {
        assert_eq!(bounded_dimensions(640, 480), (640, 480));
        assert_eq!(bounded_dimensions(1024, 1024), (1024, 1024));
    }

    #[test]
    fn large_photos_scale_to_the_bound() {
        assert_eq!(bounded_dimensions(3000, 1500), (1024, 512));
        assert_eq!(bounded_dimensions(1500, 3000), (512, 1024));
        assert_eq!(bounded_dimensions(2048, 2048), (1024, 1024));
    }

    #[test]
    fn extreme_aspect_ratios_never_collapse_to_zero() {
        let (w, h) = bounded_dimensions(100_000, 10);
        assert_eq!(w, 1024);
        assert!(h >= 1);
    }

    #[test]
    fn prepare_for_upload_produces_a_jpeg() {
        let photo = DynamicImage::new_rgb8(8, 8);
        let encoded = ImageProcessor::prepare_for_upload(&photo).unwrap();

        let bytes = BASE64.decode(encoded).unwrap();
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn prepare_for_upload_flattens_alpha() {
        let photo = DynamicImage::new_rgba8(8, 8);
        assert!(ImageProcessor::prepare_for_upload(&photo).is_ok());
    }
}
