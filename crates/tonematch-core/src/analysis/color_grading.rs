//! Split-tone color grading from zone chroma centroids.
//!
//! For each luminance zone, the reference's mean Lab chroma is compared with a
//! baseline (the source's centroid in the same zone, or neutral gray):
//! ```text
//! Δa, Δb     = centroid_ref − baseline
//! hue        = round(atan2(Δb, Δa) in degrees), wrapped into [0, 360)
//! saturation = min(round(√(Δa² + Δb²) / 1.5), 100)
//! ```

use super::stats::{self, Mask};
use super::{Diagnostics, Side};
use crate::adjustments::{ColorGrading, Zone, ZoneGrade};
use crate::color_space::lab::CHROMA_NEUTRAL;
use crate::config::{AnalysisConfig, ColorGradingConfig, GradingBaseline};

const MAX_SATURATION: i32 = 100;

/// Compute shadow/midtone/highlight grades. Balance is always 0.
pub fn compute(
    reference: &Side<'_>,
    source: &Side<'_>,
    config: &AnalysisConfig,
    diagnostics: &mut Diagnostics,
) -> ColorGrading {
    let grading = &config.color_grading;
    let mut out = ColorGrading::default();

    for zone in Zone::ALL {
        let Some(target) = zone_centroid(reference, zone, grading) else {
            diagnostics.degenerate(
                "color_grading",
                zone.label(),
                Some(reference.role),
                "neutral zone",
            );
            continue;
        };

        let baseline = match grading.baseline {
            GradingBaseline::Source => zone_centroid(source, zone, grading),
            GradingBaseline::Neutral => None,
        }
        .unwrap_or((CHROMA_NEUTRAL as f64, CHROMA_NEUTRAL as f64));

        let grade = zone_grade(target.0 - baseline.0, target.1 - baseline.1, grading);
        tracing::debug!(zone = zone.label(), ?grade, "zone grade");
        *out.get_mut(zone) = grade;
    }

    out
}

/// Whether lightness `l` belongs to `zone`.
pub fn in_zone(zone: Zone, l: f32, config: &ColorGradingConfig) -> bool {
    let l = l as f64;
    match zone {
        Zone::Shadows => l < config.shadow_upper,
        Zone::Midtones => l >= config.shadow_upper && l < config.highlight_lower,
        Zone::Highlights => l >= config.highlight_lower,
    }
}

/// Mean `(a, b)` of the side's pixels in `zone`, or `None` if the zone is empty.
fn zone_centroid(side: &Side<'_>, zone: Zone, config: &ColorGradingConfig) -> Option<(f64, f64)> {
    let lab = &side.views.lab;
    let mask = Mask::from_fn(&lab.lightness, |l| in_zone(zone, l, config));
    Some((
        stats::mean(&lab.a, Some(&mask))?,
        stats::mean(&lab.b, Some(&mask))?,
    ))
}

fn zone_grade(da: f64, db: f64, config: &ColorGradingConfig) -> ZoneGrade {
    let mut hue = db.atan2(da).to_degrees();
    if hue < 0.0 {
        hue += 360.0;
    }
    let saturation = ((da * da + db * db).sqrt() / config.saturation_divisor).round() as i32;
    ZoneGrade {
        hue: (hue.round() as i32).rem_euclid(360),
        saturation: saturation.min(MAX_SATURATION),
    }
}
