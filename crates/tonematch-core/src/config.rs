//! Tunable constants for the analysis and the preset boilerplate.
//!
//! Every weight, threshold and divisor the calculators use lives here so
//! that a partial JSON document can override just the values it names.
//! `Default` reproduces the stock behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adjustments::HueBand;
use crate::error::ConfigError;

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Added to every ratio denominator.
    pub epsilon: f64,
    pub tone: ToneConfig,
    pub hue_bands: HueBandConfig,
    pub tone_curve: ToneCurveConfig,
    pub color_grading: ColorGradingConfig,
    pub monochrome: MonochromeConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            tone: ToneConfig::default(),
            hue_bands: HueBandConfig::default(),
            tone_curve: ToneCurveConfig::default(),
            color_grading: ColorGradingConfig::default(),
            monochrome: MonochromeConfig::default(),
        }
    }
}

/// Global tone slider derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// Weight of the global lightness difference in exposure.
    pub exposure_global_weight: f64,
    /// Weight of the midtone lightness difference in exposure.
    pub exposure_midtone_weight: f64,
    /// Lightness difference that maps to one stop.
    pub exposure_divisor: f64,
    /// Exclusive lower bound of the exposure midtone mask.
    pub midtone_low: f64,
    /// Exclusive upper bound of the exposure midtone mask.
    pub midtone_high: f64,
    /// Weight of the standard-deviation ratio in contrast.
    pub contrast_stddev_weight: f64,
    /// Weight of the interpercentile-range ratio in contrast.
    pub contrast_range_weight: f64,
    /// Percentiles bounding the contrast interpercentile range.
    pub contrast_range_percentiles: (f64, f64),
    pub highlights_percentile: f64,
    pub shadows_percentile: f64,
    pub whites_percentile: f64,
    pub blacks_percentile: f64,
    /// Converts an 8-bit difference into slider units.
    pub slider_divisor: f64,
    /// Scale from chroma-channel mean difference to temperature/tint.
    pub white_balance_scale: f64,
    pub vibrance_factor: f64,
    pub texture_factor: f64,
    pub clarity_factor: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            exposure_global_weight: 0.4,
            exposure_midtone_weight: 0.6,
            exposure_divisor: 50.0,
            midtone_low: 85.0,
            midtone_high: 170.0,
            contrast_stddev_weight: 0.7,
            contrast_range_weight: 0.3,
            contrast_range_percentiles: (5.0, 95.0),
            highlights_percentile: 90.0,
            shadows_percentile: 10.0,
            whites_percentile: 95.0,
            blacks_percentile: 5.0,
            slider_divisor: 2.55,
            white_balance_scale: 0.5,
            vibrance_factor: 0.7,
            texture_factor: 0.3,
            clarity_factor: 0.5,
        }
    }
}

/// One row of the hue band table: `[start, end)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRange {
    pub band: HueBand,
    pub start: f64,
    pub end: f64,
}

impl BandRange {
    pub const fn new(band: HueBand, start: f64, end: f64) -> Self {
        Self { band, start, end }
    }

    /// Whether `hue` falls inside the half-open interval.
    pub fn contains(&self, hue: f32) -> bool {
        let hue = hue as f64;
        hue >= self.start && hue < self.end
    }
}

/// Per-band HSL derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueBandConfig {
    pub bands: [BandRange; 8],
    /// A band is analyzed only when both masks select more pixels than this.
    pub min_pixels: usize,
    pub hue_divisor: f64,
    pub saturation_divisor: f64,
    pub luminance_divisor: f64,
}

impl Default for HueBandConfig {
    fn default() -> Self {
        Self {
            bands: [
                BandRange::new(HueBand::Red, 0.0, 22.0),
                BandRange::new(HueBand::Orange, 22.0, 45.0),
                BandRange::new(HueBand::Yellow, 45.0, 67.0),
                BandRange::new(HueBand::Green, 67.0, 135.0),
                BandRange::new(HueBand::Aqua, 135.0, 157.0),
                BandRange::new(HueBand::Blue, 157.0, 247.0),
                BandRange::new(HueBand::Purple, 247.0, 280.0),
                BandRange::new(HueBand::Magenta, 280.0, 360.0),
            ],
            min_pixels: 100,
            hue_divisor: 1.8,
            saturation_divisor: 2.55,
            luminance_divisor: 2.55,
        }
    }
}

/// Tone curve sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneCurveConfig {
    /// Lightness percentiles sampled on both images, ascending.
    pub percentiles: Vec<f64>,
}

impl Default for ToneCurveConfig {
    fn default() -> Self {
        Self {
            percentiles: vec![12.5, 25.0, 50.0, 75.0, 87.5],
        }
    }
}

/// What the reference zone chroma is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingBaseline {
    /// The source image's chroma centroid in the same zone, or neutral when
    /// the source zone is empty.
    #[default]
    Source,
    /// The neutral chroma point (128, 128).
    Neutral,
}

/// Split-tone derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorGradingConfig {
    /// Shadows are `[0, shadow_upper)`.
    pub shadow_upper: f64,
    /// Highlights are `[highlight_lower, 255]`; midtones lie between.
    pub highlight_lower: f64,
    /// Chroma distance that maps to one saturation unit.
    pub saturation_divisor: f64,
    pub baseline: GradingBaseline,
}

impl Default for ColorGradingConfig {
    fn default() -> Self {
        Self {
            shadow_upper: 85.0,
            highlight_lower: 170.0,
            saturation_divisor: 1.5,
            baseline: GradingBaseline::Source,
        }
    }
}

/// Thresholds for the colorless-image heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonochromeConfig {
    /// Mean HSV saturation must be below this.
    pub max_mean_saturation: f64,
    /// 95th-percentile HSV saturation below this counts as colorless...
    pub max_p95_saturation: f64,
    /// ...as does every RGB channel pair correlating above this.
    pub min_channel_correlation: f64,
}

impl Default for MonochromeConfig {
    fn default() -> Self {
        Self {
            max_mean_saturation: 10.0,
            max_p95_saturation: 20.0,
            min_channel_correlation: 0.98,
        }
    }
}

impl AnalysisConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would make a calculator divide by zero or read
    /// outside a percentile range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::invalid("epsilon", "must be finite and positive"));
        }

        let tone = &self.tone;
        positive("tone.exposure_divisor", tone.exposure_divisor)?;
        positive("tone.slider_divisor", tone.slider_divisor)?;
        for (field, value) in [
            ("tone.exposure_global_weight", tone.exposure_global_weight),
            ("tone.exposure_midtone_weight", tone.exposure_midtone_weight),
            ("tone.contrast_stddev_weight", tone.contrast_stddev_weight),
            ("tone.contrast_range_weight", tone.contrast_range_weight),
            ("tone.white_balance_scale", tone.white_balance_scale),
            ("tone.vibrance_factor", tone.vibrance_factor),
            ("tone.texture_factor", tone.texture_factor),
            ("tone.clarity_factor", tone.clarity_factor),
        ] {
            finite(field, value)?;
        }
        if !(tone.midtone_low < tone.midtone_high) {
            return Err(ConfigError::invalid(
                "tone.midtone_low",
                "must be below tone.midtone_high",
            ));
        }
        let (low, high) = tone.contrast_range_percentiles;
        percentile("tone.contrast_range_percentiles", low)?;
        percentile("tone.contrast_range_percentiles", high)?;
        if low >= high {
            return Err(ConfigError::invalid(
                "tone.contrast_range_percentiles",
                "lower percentile must be below upper",
            ));
        }
        percentile("tone.highlights_percentile", tone.highlights_percentile)?;
        percentile("tone.shadows_percentile", tone.shadows_percentile)?;
        percentile("tone.whites_percentile", tone.whites_percentile)?;
        percentile("tone.blacks_percentile", tone.blacks_percentile)?;

        let bands = &self.hue_bands;
        positive("hue_bands.hue_divisor", bands.hue_divisor)?;
        positive("hue_bands.saturation_divisor", bands.saturation_divisor)?;
        positive("hue_bands.luminance_divisor", bands.luminance_divisor)?;
        for range in &bands.bands {
            if !(range.start.is_finite() && range.end.is_finite() && range.start < range.end) {
                return Err(ConfigError::invalid(
                    "hue_bands.bands",
                    format!("{} range must satisfy start < end", range.band.label()),
                ));
            }
        }

        let curve = &self.tone_curve.percentiles;
        for &p in curve {
            percentile("tone_curve.percentiles", p)?;
        }
        if curve.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::invalid(
                "tone_curve.percentiles",
                "must be in ascending order",
            ));
        }

        let grading = &self.color_grading;
        positive("color_grading.saturation_divisor", grading.saturation_divisor)?;
        if !(grading.shadow_upper < grading.highlight_lower) {
            return Err(ConfigError::invalid(
                "color_grading.shadow_upper",
                "must be below color_grading.highlight_lower",
            ));
        }

        let mono = &self.monochrome;
        finite("monochrome.max_mean_saturation", mono.max_mean_saturation)?;
        finite("monochrome.max_p95_saturation", mono.max_p95_saturation)?;
        finite("monochrome.min_channel_correlation", mono.min_channel_correlation)?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn percentile(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is outside [0, 100]")))
    }
}

/// Fixed values written into every preset.
///
/// These stand in for parameters nothing upstream derives yet (sharpening,
/// grain, parametric split points) plus the descriptive boilerplate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetDefaults {
    /// Preset name shown in the editor.
    pub name: String,
    /// Preset group (folder) shown in the editor.
    pub group: String,
    pub version: String,
    pub process_version: String,
    pub sharpness: i32,
    pub sharpen_radius: f64,
    pub sharpen_detail: i32,
    pub sharpen_edge_masking: i32,
    pub grain_amount: i32,
    pub grain_size: i32,
    pub grain_frequency: i32,
    /// Parametric curve shadow/midtone/highlight split points.
    pub parametric_splits: [i32; 3],
    pub color_grade_blending: i32,
    pub color_grade_global_hue: i32,
    pub color_grade_global_saturation: i32,
    /// Wrap the document in a BOM-prefixed `<?xpacket?>` header and footer.
    pub packet_wrapper: bool,
}

impl Default for PresetDefaults {
    fn default() -> Self {
        Self {
            name: "Matched Look".to_string(),
            group: "Tonematch".to_string(),
            version: "15.0".to_string(),
            process_version: "11.0".to_string(),
            sharpness: 40,
            sharpen_radius: 1.0,
            sharpen_detail: 25,
            sharpen_edge_masking: 0,
            grain_amount: 0,
            grain_size: 25,
            grain_frequency: 50,
            parametric_splits: [25, 50, 75],
            color_grade_blending: 50,
            color_grade_global_hue: 0,
            color_grade_global_saturation: 0,
            packet_wrapper: true,
        }
    }
}
