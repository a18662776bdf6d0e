//! Image representation for the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidImageError;

/// Which side of a match an image plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRole {
    /// The look to match.
    Reference,
    /// The image the preset will be applied to.
    Source,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// Internal image representation. Always stored as 8-bit RGB.
///
/// Construction validates the buffer, so every `AnalysisImage` has a
/// non-zero area and exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl AnalysisImage {
    /// Wrap an RGB pixel grid in row-major order.
    pub fn from_rgb8(
        width: u32,
        height: u32,
        pixels: Vec<[u8; 3]>,
    ) -> Result<Self, InvalidImageError> {
        let expected = check_area(width, height)?;
        if pixels.len() != expected {
            return Err(InvalidImageError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from an interleaved sample buffer with `channels` samples per
    /// pixel. Samples past the third (alpha, extra planes) are dropped.
    pub fn from_interleaved(
        width: u32,
        height: u32,
        channels: u8,
        data: &[u8],
    ) -> Result<Self, InvalidImageError> {
        if channels < 3 {
            return Err(InvalidImageError::MissingChannels { channels });
        }
        let count = check_area(width, height)?;
        let expected = count * channels as usize;
        if data.len() != expected {
            return Err(InvalidImageError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(channels as usize)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a decoded image. Grayscale color types are rejected; every
    /// other type is reduced to 8-bit RGB.
    pub fn from_dynamic(img: &::image::DynamicImage) -> Result<Self, InvalidImageError> {
        let channels = img.color().channel_count();
        if channels < 3 {
            return Err(InvalidImageError::MissingChannels { channels });
        }
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| p.0).collect();
        Self::from_rgb8(width, height, pixels)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false` for a constructed image; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

fn check_area(width: u32, height: u32) -> Result<usize, InvalidImageError> {
    if width == 0 || height == 0 {
        return Err(InvalidImageError::ZeroArea { width, height });
    }
    Ok(width as usize * height as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{DynamicImage, GrayImage, RgbaImage};

    #[test]
    fn test_from_rgb8_rejects_zero_area() {
        let err = AnalysisImage::from_rgb8(0, 4, vec![]).unwrap_err();
        assert_eq!(err, InvalidImageError::ZeroArea { width: 0, height: 4 });
    }

    #[test]
    fn test_from_rgb8_rejects_short_buffer() {
        let err = AnalysisImage::from_rgb8(2, 2, vec![[0, 0, 0]; 3]).unwrap_err();
        assert_eq!(
            err,
            InvalidImageError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_interleaved_drops_alpha() {
        let data = [10, 20, 30, 255, 40, 50, 60, 0];
        let img = AnalysisImage::from_interleaved(2, 1, 4, &data).unwrap();
        assert_eq!(img.pixels(), &[[10, 20, 30], [40, 50, 60]]);
    }

    #[test]
    fn test_from_interleaved_rejects_two_channels() {
        let err = AnalysisImage::from_interleaved(1, 1, 2, &[0, 0]).unwrap_err();
        assert_eq!(err, InvalidImageError::MissingChannels { channels: 2 });
    }

    #[test]
    fn test_from_dynamic_rejects_grayscale() {
        let gray = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        let err = AnalysisImage::from_dynamic(&gray).unwrap_err();
        assert_eq!(err, InvalidImageError::MissingChannels { channels: 1 });
    }

    #[test]
    fn test_from_dynamic_accepts_rgba() {
        let mut rgba = RgbaImage::new(3, 2);
        rgba.put_pixel(1, 1, ::image::Rgba([200, 100, 50, 128]));
        let img = AnalysisImage::from_dynamic(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixels()[4], [200, 100, 50]);
    }
}
