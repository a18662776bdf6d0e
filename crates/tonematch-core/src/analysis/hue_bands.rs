//! Per-band HSL adjustments.
//!
//! For each band of the hue table, both images are masked to the pixels
//! whose HSV hue falls in the band. A band with too few pixels on either side
//! is left neutral rather than estimated from a handful of samples.

use super::stats::{self, Mask};
use super::{Diagnostics, Side};
use crate::adjustments::{BandAdjustment, HueBandAdjustments, round_slider};
use crate::config::{AnalysisConfig, BandRange, HueBandConfig};
use crate::image::ImageRole;

/// Compute hue/saturation/luminance deltas for every configured band.
pub fn compute(
    reference: &Side<'_>,
    source: &Side<'_>,
    config: &AnalysisConfig,
    diagnostics: &mut Diagnostics,
) -> HueBandAdjustments {
    let bands = &config.hue_bands;
    let mut out = HueBandAdjustments::default();

    for range in &bands.bands {
        let ref_mask = Mask::from_fn(&reference.views.hsv.hue, |h| range.contains(h));
        let src_mask = Mask::from_fn(&source.views.hsv.hue, |h| range.contains(h));

        for (role, mask) in [(ImageRole::Reference, &ref_mask), (ImageRole::Source, &src_mask)] {
            if mask.is_empty() {
                diagnostics.degenerate("hue_bands", range.band.label(), Some(role), "neutral band");
            }
        }

        if ref_mask.count() <= bands.min_pixels || src_mask.count() <= bands.min_pixels {
            tracing::debug!(
                band = range.band.label(),
                reference_pixels = ref_mask.count(),
                source_pixels = src_mask.count(),
                "band undersampled, leaving neutral"
            );
            continue;
        }

        let adjustment = band_adjustment(reference, source, &ref_mask, &src_mask, bands);
        tracing::debug!(band = range.band.label(), ?adjustment, "band adjustment");
        out.set(range.band, adjustment);
    }

    out
}

fn band_adjustment(
    reference: &Side<'_>,
    source: &Side<'_>,
    ref_mask: &Mask,
    src_mask: &Mask,
    bands: &HueBandConfig,
) -> BandAdjustment {
    let delta = |r: &[f32], s: &[f32], divisor: f64| {
        match (stats::mean(r, Some(ref_mask)), stats::mean(s, Some(src_mask))) {
            (Some(r), Some(s)) => round_slider((r - s) / divisor),
            _ => 0,
        }
    };

    let (rv, sv) = (&reference.views.hsv, &source.views.hsv);
    BandAdjustment {
        hue: delta(&rv.hue, &sv.hue, bands.hue_divisor),
        saturation: delta(&rv.saturation, &sv.saturation, bands.saturation_divisor),
        luminance: delta(&rv.value, &sv.value, bands.luminance_divisor),
    }
}

/// The band `hue` belongs to, if any.
pub fn band_for_hue(bands: &[BandRange], hue: f32) -> Option<&BandRange> {
    bands.iter().find(|range| range.contains(hue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::HueBand;
    use crate::analysis::test_support::views;
    use crate::color_space::ImageViews;

    /// `n` pixels of hue `h`, saturation `s`, value `v`.
    fn patch(h: f32, s: f32, v: f32, n: usize) -> Vec<[f32; 3]> {
        vec![[h, s, v]; n]
    }

    fn image(hsv: Vec<[f32; 3]>) -> ImageViews {
        let n = hsv.len();
        views(&vec![[128.0, 128.0, 128.0]; n], &hsv, &vec![[128.0; 3]; n])
    }

    fn run(reference: &ImageViews, source: &ImageViews) -> (HueBandAdjustments, Diagnostics) {
        let mut diagnostics = Diagnostics::default();
        let r = Side::new(ImageRole::Reference, reference);
        let s = Side::new(ImageRole::Source, source);
        let out = compute(&r, &s, &AnalysisConfig::default(), &mut diagnostics);
        (out, diagnostics)
    }

    #[test]
    fn test_band_shift_uses_weighted_means() {
        let reference = image(patch(200.0, 153.0, 204.0, 150));
        let source = image(patch(182.0, 102.0, 153.0, 150));
        let (bands, _) = run(&reference, &source);
        let blue = bands.get(HueBand::Blue);
        assert_eq!(blue.hue, 10);
        assert_eq!(blue.saturation, 20);
        assert_eq!(blue.luminance, 20);
        assert_eq!(bands.get(HueBand::Red), BandAdjustment::NEUTRAL);
    }

    #[test]
    fn test_undersampled_band_is_neutral() {
        // 100 pixels is not more than the 100-pixel minimum.
        let reference = image(patch(100.0, 250.0, 250.0, 100));
        let source = image(patch(80.0, 10.0, 10.0, 100));
        let (bands, diagnostics) = run(&reference, &source);
        assert_eq!(bands.get(HueBand::Green), BandAdjustment::NEUTRAL);
        // Not empty, so no degenerate warning for green.
        assert!(!diagnostics.warnings().iter().any(|w| w.region == "Green"));
    }

    #[test]
    fn test_missing_hue_yields_neutral_band_and_warning() {
        let reference = image(patch(30.0, 200.0, 200.0, 150));
        let source = image(patch(300.0, 200.0, 200.0, 150));
        let (bands, diagnostics) = run(&reference, &source);
        assert_eq!(bands.get(HueBand::Orange), BandAdjustment::NEUTRAL);
        assert_eq!(bands.get(HueBand::Magenta), BandAdjustment::NEUTRAL);
        assert!(diagnostics.warnings().iter().any(|w| {
            w.region == "Orange" && w.role == Some(ImageRole::Source)
        }));
    }

    #[test]
    fn test_band_deltas_are_clamped() {
        let reference = image(patch(359.0, 255.0, 255.0, 150));
        let source = image(patch(280.0, 0.0, 0.0, 150));
        let (bands, _) = run(&reference, &source);
        let magenta = bands.get(HueBand::Magenta);
        assert_eq!(magenta.hue, 44);
        assert_eq!(magenta.saturation, 100);
        assert_eq!(magenta.luminance, 100);
    }

    #[test]
    fn test_band_for_hue_follows_table() {
        let table = HueBandConfig::default().bands;
        assert_eq!(band_for_hue(&table, 0.0).map(|r| r.band), Some(HueBand::Red));
        assert_eq!(band_for_hue(&table, 22.0).map(|r| r.band), Some(HueBand::Orange));
        assert_eq!(band_for_hue(&table, 246.9).map(|r| r.band), Some(HueBand::Blue));
        assert_eq!(band_for_hue(&table, 359.9).map(|r| r.band), Some(HueBand::Magenta));
        assert_eq!(band_for_hue(&table, 360.0), None);
    }
}
