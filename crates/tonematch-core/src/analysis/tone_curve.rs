//! Percentile-matched tone curve.
//!
//! Each control point maps the source's lightness at a percentile to the
//! reference's lightness at the same percentile. Percentiles of one channel
//! are non-decreasing, so the inputs come out sorted without any extra
//! enforcement.

use super::Side;
use crate::adjustments::ToneCurve;
use crate::config::ToneCurveConfig;

/// Inputs stay strictly inside the `(0, 0)` / `(255, 255)` anchors.
const INPUT_RANGE: (i32, i32) = (ToneCurve::START.0 + 1, ToneCurve::END.0 - 1);
const OUTPUT_RANGE: (i32, i32) = (ToneCurve::START.1, ToneCurve::END.1);

/// Sample one control point per configured percentile, in percentile order.
pub fn compute(reference: &Side<'_>, source: &Side<'_>, config: &ToneCurveConfig) -> ToneCurve {
    let points: Vec<(i32, i32)> = config
        .percentiles
        .iter()
        .map(|&p| {
            let input = (source.lightness_percentile(p) as i32).clamp(INPUT_RANGE.0, INPUT_RANGE.1);
            let output =
                (reference.lightness_percentile(p) as i32).clamp(OUTPUT_RANGE.0, OUTPUT_RANGE.1);
            (input, output)
        })
        .collect();

    tracing::debug!(?points, "tone curve");
    ToneCurve::new(points)
}
