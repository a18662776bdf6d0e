//! Global tone sliders from lightness, chroma and saturation statistics.
//!
//! # Formulas
//! With `ΔX = X(reference) − X(source)` over Lab lightness `L`:
//! ```text
//! exposure   = round2((0.4·Δmean(L) + 0.6·Δmean(L | 85 < L < 170)) / 50)
//! contrast   = trunc((0.7·σ_ref/σ_src + 0.3·IPR_ref/IPR_src − 1) × 100)
//! highlights = trunc(ΔP90(L) / 2.55)      shadows = trunc(ΔP10(L) / 2.55)
//! whites     = trunc(ΔP95(L) / 2.55)      blacks  = trunc(ΔP5(L)  / 2.55)
//! temperature = trunc(Δmean(b) × 0.5)     tint    = trunc(Δmean(a) × 0.5)
//! saturation = trunc(Δmean(S) / 2.55)     vibrance = round(saturation × 0.7)
//! texture    = round(contrast × 0.3)      clarity  = round(contrast × 0.5)
//! ```
//! where IPR is the 5th–95th percentile range. Bounded sliders are clamped
//! to `[-100, 100]` after truncation; the constants come from [`ToneConfig`].

use super::stats::{self, Mask};
use super::{Diagnostics, Side};
use crate::adjustments::{ToneAdjustments, round_slider, truncate_slider};
use crate::config::{AnalysisConfig, ToneConfig};

const CALCULATOR: &str = "tone";

/// Compute every global tone slider.
pub fn compute(
    reference: &Side<'_>,
    source: &Side<'_>,
    config: &AnalysisConfig,
    diagnostics: &mut Diagnostics,
) -> ToneAdjustments {
    let tone = &config.tone;
    let eps = config.epsilon;

    let exposure = exposure(reference, source, tone, diagnostics);
    let contrast = contrast(reference, source, tone, eps, diagnostics);

    let percentile_slider = |p: f64| {
        truncate_slider(
            (reference.lightness_percentile(p) - source.lightness_percentile(p))
                / tone.slider_divisor,
        )
    };
    let highlights = percentile_slider(tone.highlights_percentile);
    let shadows = percentile_slider(tone.shadows_percentile);
    let whites = percentile_slider(tone.whites_percentile);
    let blacks = percentile_slider(tone.blacks_percentile);

    let temperature = white_balance_shift(&reference.views.lab.b, &source.views.lab.b, tone);
    let tint = white_balance_shift(&reference.views.lab.a, &source.views.lab.a, tone);

    let saturation = truncate_slider(
        mean_difference(&reference.views.hsv.saturation, &source.views.hsv.saturation)
            / tone.slider_divisor,
    );
    let vibrance = round_slider(saturation as f64 * tone.vibrance_factor);
    let texture = round_slider(contrast as f64 * tone.texture_factor);
    let clarity = round_slider(contrast as f64 * tone.clarity_factor);

    let adjustments = ToneAdjustments {
        exposure,
        contrast,
        highlights,
        shadows,
        whites,
        blacks,
        temperature,
        tint,
        texture,
        clarity,
        dehaze: 0,
        vibrance,
        saturation,
    };
    tracing::debug!(?adjustments, "tone sliders");
    adjustments
}

/// Blend of global and midtone lightness differences, in stops.
fn exposure(
    reference: &Side<'_>,
    source: &Side<'_>,
    tone: &ToneConfig,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let ref_l = &reference.views.lab.lightness;
    let src_l = &source.views.lab.lightness;
    let global = mean_difference(ref_l, src_l);

    let in_midtones = |l: f32| {
        let l = l as f64;
        l > tone.midtone_low && l < tone.midtone_high
    };
    let ref_mid = stats::mean(ref_l, Some(&Mask::from_fn(ref_l, in_midtones)));
    let src_mid = stats::mean(src_l, Some(&Mask::from_fn(src_l, in_midtones)));

    let difference = match (ref_mid, src_mid) {
        (Some(r), Some(s)) => {
            tone.exposure_global_weight * global + tone.exposure_midtone_weight * (r - s)
        }
        (r, _) => {
            let role = if r.is_none() { reference.role } else { source.role };
            diagnostics.degenerate(
                "exposure",
                "midtones",
                Some(role),
                "global lightness difference",
            );
            global
        }
    };

    round_to_hundredths(difference / tone.exposure_divisor)
}

/// Weighted spread ratio mapped to a slider.
fn contrast(
    reference: &Side<'_>,
    source: &Side<'_>,
    tone: &ToneConfig,
    eps: f64,
    diagnostics: &mut Diagnostics,
) -> i32 {
    let ref_sd = stats::stddev(&reference.views.lab.lightness, None).unwrap_or(0.0);
    let src_sd = stats::stddev(&source.views.lab.lightness, None).unwrap_or(0.0);

    let (lo, hi) = tone.contrast_range_percentiles;
    let ref_range = reference.lightness_percentile(hi) - reference.lightness_percentile(lo);
    let src_range = source.lightness_percentile(hi) - source.lightness_percentile(lo);

    let sd_ratio = spread_ratio(ref_sd, src_sd, eps, "stddev", diagnostics);
    let range_ratio = spread_ratio(ref_range, src_range, eps, "percentile range", diagnostics);

    let ratio = tone.contrast_stddev_weight * sd_ratio + tone.contrast_range_weight * range_ratio;
    truncate_slider((ratio - 1.0) * 100.0)
}

/// `reference / (source + ε)`, or 1.0 when neither side has any spread.
fn spread_ratio(
    reference: f64,
    source: f64,
    eps: f64,
    region: &'static str,
    diagnostics: &mut Diagnostics,
) -> f64 {
    if reference < eps && source < eps {
        diagnostics.degenerate(CALCULATOR, region, None, "unit contrast ratio");
        return 1.0;
    }
    reference / (source + eps)
}

/// Incremental temperature or tint from a chroma channel.
fn white_balance_shift(reference: &[f32], source: &[f32], tone: &ToneConfig) -> i32 {
    (mean_difference(reference, source) * tone.white_balance_scale) as i32
}

fn mean_difference(reference: &[f32], source: &[f32]) -> f64 {
    stats::mean(reference, None).unwrap_or(0.0) - stats::mean(source, None).unwrap_or(0.0)
}

/// Round half away from zero to two decimals. Never returns `-0.0`.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
