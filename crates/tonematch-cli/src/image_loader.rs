//! Image loading for the command line tool.

use std::path::Path;

use tonematch_core::{AnalysisImage, InvalidImageError};

/// Load an image from disk and convert it to 8-bit RGB for analysis.
///
/// Supports the common formats of the `image` crate (PNG, JPEG, TIFF, ...).
/// Alpha is dropped; single-channel images are rejected.
pub fn load_image(path: &Path) -> Result<AnalysisImage, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(AnalysisImage::from_dynamic(&img)?)
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("unsupported image: {0}")]
    Unsupported(#[from] InvalidImageError),
}
