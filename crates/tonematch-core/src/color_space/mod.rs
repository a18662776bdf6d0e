//! Perceptual color-space views of an analysis image.
//!
//! Each view is a set of planar `f32` channels in the image's row-major pixel
//! order, so a mask built on one channel of one view applies to every other
//! channel of the same image.

pub mod hsv;
pub mod lab;

pub use hsv::HsvView;
pub use lab::LabView;

use crate::image::AnalysisImage;

/// Raw RGB channels as planar `f32` in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbView {
    pub red: Vec<f32>,
    pub green: Vec<f32>,
    pub blue: Vec<f32>,
}

impl RgbView {
    /// Split an image into planes.
    pub fn from_image(image: &AnalysisImage) -> Self {
        let n = image.len();
        let mut red = Vec::with_capacity(n);
        let mut green = Vec::with_capacity(n);
        let mut blue = Vec::with_capacity(n);
        for px in image.pixels() {
            red.push(px[0] as f32);
            green.push(px[1] as f32);
            blue.push(px[2] as f32);
        }
        Self { red, green, blue }
    }
}

/// Every representation the calculators read for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageViews {
    pub lab: LabView,
    pub hsv: HsvView,
    pub rgb: RgbView,
}

impl ImageViews {
    /// Convert an image into its Lab, HSV and RGB views.
    pub fn from_image(image: &AnalysisImage) -> Self {
        Self {
            lab: LabView::from_image(image),
            hsv: HsvView::from_image(image),
            rgb: RgbView::from_image(image),
        }
    }

    /// Number of pixels in every channel.
    pub fn len(&self) -> usize {
        self.lab.lightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize an 8-bit sample to `[0, 1]`.
pub(crate) fn unit(sample: u8) -> f32 {
    sample as f32 / 255.0
}

/// Round and clamp into the 8-bit range.
pub(crate) fn quantize(value: f32) -> f32 {
    value.round().clamp(0.0, 255.0)
}
