//! HSV view with hue in degrees.

use palette::{FromColor, Hsv, Srgb};

use super::{quantize, unit};
use crate::image::AnalysisImage;

/// HSV channels of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvView {
    /// Hue in degrees, `[0, 360)`. Achromatic pixels report 0.
    pub hue: Vec<f32>,
    /// Saturation, `[0, 255]`.
    pub saturation: Vec<f32>,
    /// Value, `[0, 255]`.
    pub value: Vec<f32>,
}

impl HsvView {
    /// Convert every pixel of `image`.
    pub fn from_image(image: &AnalysisImage) -> Self {
        let n = image.len();
        let mut hue = Vec::with_capacity(n);
        let mut saturation = Vec::with_capacity(n);
        let mut value = Vec::with_capacity(n);

        for &px in image.pixels() {
            let [h, s, v] = rgb_to_hsv8(px);
            hue.push(h);
            saturation.push(s);
            value.push(v);
        }

        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Convert one 8-bit sRGB pixel to `[hue°, s8, v8]`.
pub fn rgb_to_hsv8(rgb: [u8; 3]) -> [f32; 3] {
    let srgb = Srgb::new(unit(rgb[0]), unit(rgb[1]), unit(rgb[2]));
    let hsv: Hsv = Hsv::from_color(srgb);
    let mut hue = hsv.hue.into_positive_degrees();
    if !(0.0..360.0).contains(&hue) {
        hue = 0.0;
    }
    [
        hue,
        quantize(hsv.saturation * 255.0),
        quantize(hsv.value * 255.0),
    ]
}
