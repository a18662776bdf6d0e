//! 8-bit CIE Lab (D65) view.
//!
//! Uses the common 8-bit packing:
//! ```text
//! L8 = L* × 255 / 100
//! a8 = a* + 128
//! b8 = b* + 128
//! ```
//! so lightness spans `[0, 255]` and neutral chroma sits at 128. Each sample
//! is rounded and clamped the way an 8-bit buffer would store it.

use palette::{FromColor, Lab, Srgb};

use super::{quantize, unit};
use crate::image::AnalysisImage;

/// Neutral value of the packed chroma channels.
pub const CHROMA_NEUTRAL: f32 = 128.0;

/// Lab channels of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct LabView {
    /// Lightness, `[0, 255]`.
    pub lightness: Vec<f32>,
    /// Green–red axis, neutral at 128.
    pub a: Vec<f32>,
    /// Blue–yellow axis, neutral at 128.
    pub b: Vec<f32>,
}

impl LabView {
    /// Convert every pixel of `image`.
    pub fn from_image(image: &AnalysisImage) -> Self {
        let n = image.len();
        let mut lightness = Vec::with_capacity(n);
        let mut a = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);

        for &px in image.pixels() {
            let [l8, a8, b8] = rgb_to_lab8(px);
            lightness.push(l8);
            a.push(a8);
            b.push(b8);
        }

        Self { lightness, a, b }
    }
}

/// Convert one 8-bit sRGB pixel to packed 8-bit Lab.
pub fn rgb_to_lab8(rgb: [u8; 3]) -> [f32; 3] {
    let srgb = Srgb::new(unit(rgb[0]), unit(rgb[1]), unit(rgb[2]));
    let lab: Lab = Lab::from_color(srgb);
    [
        quantize(lab.l * 255.0 / 100.0),
        quantize(lab.a + CHROMA_NEUTRAL),
        quantize(lab.b + CHROMA_NEUTRAL),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_and_white_span_lightness_range() {
        assert_eq!(rgb_to_lab8([0, 0, 0])[0], 0.0);
        assert_eq!(rgb_to_lab8([255, 255, 255])[0], 255.0);
    }

    #[test]
    fn test_gray_is_chroma_neutral() {
        for v in [0u8, 64, 128, 200, 255] {
            let [_, a, b] = rgb_to_lab8([v, v, v]);
            assert_eq!(a, CHROMA_NEUTRAL, "a for gray {v}");
            assert_eq!(b, CHROMA_NEUTRAL, "b for gray {v}");
        }
    }

    #[test]
    fn test_red_has_positive_a() {
        let [_, a, _] = rgb_to_lab8([255, 0, 0]);
        assert!(a > 180.0, "red a = {a}");
    }

    #[test]
    fn test_blue_has_negative_b() {
        let [_, _, b] = rgb_to_lab8([0, 0, 255]);
        assert!(b < 50.0, "blue b = {b}");
    }

    #[test]
    fn test_lightness_is_monotonic_in_gray() {
        let mut last = -1.0;
        for v in (0..=255u8).step_by(5) {
            let [l, _, _] = rgb_to_lab8([v, v, v]);
            assert!(l >= last, "lightness dropped at {v}");
            last = l;
        }
    }
}
