//! Reference/source matching — statistics, calculators, and the run entry point.
//!
//! A run is stateless: [`analyze`] takes a [`MatchRequest`] carrying both
//! images, converts each to its color-space views once, and hands the two
//! views to every calculator. Calculators never see each other's output
//! except where a value is defined as a derivative (vibrance, texture,
//! clarity).

pub mod color_grading;
pub mod hue_bands;
pub mod monochrome;
pub mod stats;
pub mod tone;
pub mod tone_curve;

use crate::adjustments::AdjustmentSet;
use crate::color_space::ImageViews;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, DegenerateStatisticsWarning};
use crate::image::{AnalysisImage, ImageRole};

use stats::SortedSamples;

/// Both images of one run.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub reference: AnalysisImage,
    pub source: AnalysisImage,
}

impl MatchRequest {
    pub fn new(reference: AnalysisImage, source: AnalysisImage) -> Self {
        Self { reference, source }
    }

    /// Build a request from two decoded images, tagging any rejection with
    /// the role of the offending image.
    pub fn from_dynamic(
        reference: &::image::DynamicImage,
        source: &::image::DynamicImage,
    ) -> Result<Self, AnalysisError> {
        let reference =
            AnalysisImage::from_dynamic(reference).map_err(|source| AnalysisError::InvalidImage {
                role: ImageRole::Reference,
                source,
            })?;
        let source =
            AnalysisImage::from_dynamic(source).map_err(|source| AnalysisError::InvalidImage {
                role: ImageRole::Source,
                source,
            })?;
        Ok(Self { reference, source })
    }
}

/// Result of a run: the adjustments plus every non-fatal fallback taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub adjustments: AdjustmentSet,
    pub warnings: Vec<DegenerateStatisticsWarning>,
}

/// One image's views plus the sorted distributions several calculators query.
#[derive(Debug)]
pub struct Side<'a> {
    pub role: ImageRole,
    pub views: &'a ImageViews,
    /// Sorted Lab lightness.
    pub lightness: SortedSamples,
    /// Sorted HSV saturation.
    pub saturation: SortedSamples,
}

impl<'a> Side<'a> {
    pub fn new(role: ImageRole, views: &'a ImageViews) -> Self {
        Self {
            role,
            views,
            lightness: SortedSamples::new(&views.lab.lightness, None),
            saturation: SortedSamples::new(&views.hsv.saturation, None),
        }
    }

    /// Percentile of the lightness channel. Views are never empty, so the
    /// `0.0` fallback only guards hand-built views.
    pub fn lightness_percentile(&self, p: f64) -> f64 {
        self.lightness.percentile(p).unwrap_or(0.0)
    }

    pub fn saturation_percentile(&self, p: f64) -> f64 {
        self.saturation.percentile(p).unwrap_or(0.0)
    }
}

/// Collects degenerate-statistics fallbacks taken during a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<DegenerateStatisticsWarning>,
}

impl Diagnostics {
    pub(crate) fn degenerate(
        &mut self,
        calculator: &'static str,
        region: impl Into<String>,
        role: Option<ImageRole>,
        fallback: &'static str,
    ) {
        let warning = DegenerateStatisticsWarning {
            calculator,
            region: region.into(),
            role,
            fallback,
        };
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[DegenerateStatisticsWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<DegenerateStatisticsWarning> {
        self.warnings
    }
}

/// Derive the adjustment set that moves `request.source` toward
/// `request.reference`.
pub fn analyze(request: &MatchRequest, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    let reference = ImageViews::from_image(&request.reference);
    let source = ImageViews::from_image(&request.source);
    tracing::debug!(
        reference_pixels = reference.len(),
        source_pixels = source.len(),
        "converted images to Lab/HSV"
    );

    Ok(analyze_views(&reference, &source, config))
}

/// Run every calculator over already-converted views.
///
/// Does not validate `config`; [`analyze`] does.
pub fn analyze_views(
    reference: &ImageViews,
    source: &ImageViews,
    config: &AnalysisConfig,
) -> Analysis {
    let reference = Side::new(ImageRole::Reference, reference);
    let source = Side::new(ImageRole::Source, source);
    let mut diagnostics = Diagnostics::default();

    let tone = tone::compute(&reference, &source, config, &mut diagnostics);
    let hue_bands = hue_bands::compute(&reference, &source, config, &mut diagnostics);
    let tone_curve = tone_curve::compute(&reference, &source, &config.tone_curve);
    let color_grading = color_grading::compute(&reference, &source, config, &mut diagnostics);
    let grayscale_recommended = monochrome::recommend_grayscale(&reference, &source, config);

    tracing::info!(
        exposure = tone.exposure,
        contrast = tone.contrast,
        temperature = tone.temperature,
        tint = tone.tint,
        grayscale = grayscale_recommended,
        warnings = diagnostics.warnings().len(),
        "analysis complete"
    );

    Analysis {
        adjustments: AdjustmentSet {
            tone,
            hue_bands,
            tone_curve,
            color_grading,
            grayscale_recommended,
        },
        warnings: diagnostics.into_warnings(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! View builders shared by the calculator tests.

    use crate::color_space::{HsvView, ImageViews, LabView, RgbView};

    /// Views where every channel is given explicitly per pixel.
    pub fn views(lab: &[[f32; 3]], hsv: &[[f32; 3]], rgb: &[[f32; 3]]) -> ImageViews {
        assert_eq!(lab.len(), hsv.len());
        assert_eq!(lab.len(), rgb.len());
        ImageViews {
            lab: LabView {
                lightness: lab.iter().map(|p| p[0]).collect(),
                a: lab.iter().map(|p| p[1]).collect(),
                b: lab.iter().map(|p| p[2]).collect(),
            },
            hsv: HsvView {
                hue: hsv.iter().map(|p| p[0]).collect(),
                saturation: hsv.iter().map(|p| p[1]).collect(),
                value: hsv.iter().map(|p| p[2]).collect(),
            },
            rgb: RgbView {
                red: rgb.iter().map(|p| p[0]).collect(),
                green: rgb.iter().map(|p| p[1]).collect(),
                blue: rgb.iter().map(|p| p[2]).collect(),
            },
        }
    }

    /// Views with the given lightness ramp and neutral chroma/saturation.
    pub fn gray_views(lightness: &[f32]) -> ImageViews {
        let lab: Vec<_> = lightness.iter().map(|&l| [l, 128.0, 128.0]).collect();
        let hsv: Vec<_> = lightness.iter().map(|&l| [0.0, 0.0, l]).collect();
        let rgb: Vec<_> = lightness.iter().map(|&l| [l, l, l]).collect();
        views(&lab, &hsv, &rgb)
    }

    /// Lightness values spread evenly over `[lo, hi]`.
    pub fn ramp(lo: f32, hi: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| lo + (hi - lo) * i as f32 / (n - 1).max(1) as f32)
            .collect()
    }
}
