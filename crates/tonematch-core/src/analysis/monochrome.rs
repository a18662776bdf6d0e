//! Colorless-image heuristic and grayscale recommendation.
//!
//! An image counts as monochrome when
//! ```text
//! mean(S) < 10  AND  (P95(S) < 20  OR  corr(R,G), corr(R,B), corr(G,B) > 0.98)
//! ```
//! The grayscale flag fires only for a monochrome reference paired with a
//! color source.

use super::Side;
use super::stats;
use crate::config::{AnalysisConfig, MonochromeConfig};

/// The raw signals the classifier combines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonochromeSignals {
    pub mean_saturation: f64,
    pub p95_saturation: f64,
    /// `[r·g, r·b, g·b]` Pearson correlations.
    pub channel_correlations: [f64; 3],
}

impl MonochromeSignals {
    /// Measure one image.
    pub fn measure(side: &Side<'_>, epsilon: f64) -> Self {
        let rgb = &side.views.rgb;
        Self {
            mean_saturation: stats::mean(&side.views.hsv.saturation, None).unwrap_or(0.0),
            p95_saturation: side.saturation_percentile(95.0),
            channel_correlations: [
                stats::correlation(&rgb.red, &rgb.green, epsilon),
                stats::correlation(&rgb.red, &rgb.blue, epsilon),
                stats::correlation(&rgb.green, &rgb.blue, epsilon),
            ],
        }
    }

    /// Apply the thresholds.
    pub fn is_monochrome(&self, config: &MonochromeConfig) -> bool {
        let low_mean = self.mean_saturation < config.max_mean_saturation;
        let low_peak = self.p95_saturation < config.max_p95_saturation;
        let correlated = self
            .channel_correlations
            .iter()
            .all(|&r| r > config.min_channel_correlation);
        low_mean && (low_peak || correlated)
    }
}

/// Classify one image.
pub fn is_monochrome(side: &Side<'_>, config: &AnalysisConfig) -> bool {
    let signals = MonochromeSignals::measure(side, config.epsilon);
    let monochrome = signals.is_monochrome(&config.monochrome);
    tracing::debug!(role = %side.role, ?signals, monochrome, "monochrome check");
    monochrome
}

/// True only when the reference is monochrome and the source is not.
pub fn recommend_grayscale(reference: &Side<'_>, source: &Side<'_>, config: &AnalysisConfig) -> bool {
    is_monochrome(reference, config) && !is_monochrome(source, config)
}
