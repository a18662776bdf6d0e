//! The adjustment set produced by one analysis run.
//!
//! `AdjustmentSet` is the single contract between the calculators and the
//! preset serializer. Every calculator writes one part of it; the serializer
//! reads the whole struct and never recomputes a value.

use serde::{Deserialize, Serialize};

/// Lower bound shared by every bounded slider.
pub const SLIDER_MIN: i32 = -100;
/// Upper bound shared by every bounded slider.
pub const SLIDER_MAX: i32 = 100;

/// The eight hue bands of the HSL panel, in hue-angle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HueBand {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HueBand {
    /// All bands in table order.
    pub const ALL: [HueBand; 8] = [
        HueBand::Red,
        HueBand::Orange,
        HueBand::Yellow,
        HueBand::Green,
        HueBand::Aqua,
        HueBand::Blue,
        HueBand::Purple,
        HueBand::Magenta,
    ];

    /// Name used in preset attribute keys, e.g. `HueAdjustmentRed`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Aqua => "Aqua",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Magenta => "Magenta",
        }
    }

    /// Position in [`HueBand::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Luminance zones used for split-tone color grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Shadows,
    Midtones,
    Highlights,
}

impl Zone {
    /// All zones from dark to bright.
    pub const ALL: [Zone; 3] = [Zone::Shadows, Zone::Midtones, Zone::Highlights];

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Shadows => "Shadows",
            Self::Midtones => "Midtones",
            Self::Highlights => "Highlights",
        }
    }
}

/// Global tone and presence sliders.
///
/// Every integer field except `temperature` and `tint` lies in
/// `[SLIDER_MIN, SLIDER_MAX]`. `exposure` is rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneAdjustments {
    /// Exposure in stops. 0.0 = neutral.
    pub exposure: f64,
    pub contrast: i32,
    pub highlights: i32,
    pub shadows: i32,
    pub whites: i32,
    pub blacks: i32,
    /// Incremental white-balance temperature. Unbounded.
    pub temperature: i32,
    /// Incremental white-balance tint. Unbounded.
    pub tint: i32,
    pub texture: i32,
    pub clarity: i32,
    /// Always 0; no haze signal is modeled.
    pub dehaze: i32,
    pub vibrance: i32,
    pub saturation: i32,
}

/// Hue shift, saturation delta and luminance delta for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandAdjustment {
    pub hue: i32,
    pub saturation: i32,
    pub luminance: i32,
}

impl BandAdjustment {
    /// No change.
    pub const NEUTRAL: Self = Self {
        hue: 0,
        saturation: 0,
        luminance: 0,
    };
}

/// Per-band adjustments for all eight hue bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HueBandAdjustments {
    bands: [BandAdjustment; 8],
}

impl HueBandAdjustments {
    /// Adjustment for `band`.
    pub fn get(&self, band: HueBand) -> BandAdjustment {
        self.bands[band.index()]
    }

    /// Replace the adjustment for `band`.
    pub fn set(&mut self, band: HueBand, adjustment: BandAdjustment) {
        self.bands[band.index()] = adjustment;
    }

    /// Bands paired with their adjustments, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (HueBand, BandAdjustment)> + '_ {
        HueBand::ALL.iter().map(|&band| (band, self.get(band)))
    }
}

/// Sampled tone-curve control points.
///
/// Stores only the sampled points; the fixed `(0, 0)` and `(255, 255)`
/// anchors are added by [`ToneCurve::anchored`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToneCurve {
    points: Vec<(i32, i32)>,
}

impl ToneCurve {
    /// First anchor of every curve.
    pub const START: (i32, i32) = (0, 0);
    /// Last anchor of every curve.
    pub const END: (i32, i32) = (255, 255);

    /// Wrap sampled `(input, output)` points in percentile order.
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    /// The sampled points without anchors.
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// All knots including both anchors.
    pub fn anchored(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        std::iter::once(Self::START)
            .chain(self.points.iter().copied())
            .chain(std::iter::once(Self::END))
    }
}

/// Split-tone hue and saturation for one luminance zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneGrade {
    /// Hue in whole degrees, `[0, 360)`.
    pub hue: i32,
    /// Saturation, `[0, 100]`.
    pub saturation: i32,
}

/// Three-way color grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorGrading {
    pub shadows: ZoneGrade,
    pub midtones: ZoneGrade,
    pub highlights: ZoneGrade,
    /// Shadow/highlight balance. Always 0; no signal is modeled.
    pub balance: i32,
}

impl ColorGrading {
    /// Grade for `zone`.
    pub fn get(&self, zone: Zone) -> ZoneGrade {
        match zone {
            Zone::Shadows => self.shadows,
            Zone::Midtones => self.midtones,
            Zone::Highlights => self.highlights,
        }
    }

    /// Mutable grade for `zone`.
    pub fn get_mut(&mut self, zone: Zone) -> &mut ZoneGrade {
        match zone {
            Zone::Shadows => &mut self.shadows,
            Zone::Midtones => &mut self.midtones,
            Zone::Highlights => &mut self.highlights,
        }
    }
}

/// Everything one run derives from a reference/source pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustmentSet {
    pub tone: ToneAdjustments,
    pub hue_bands: HueBandAdjustments,
    pub tone_curve: ToneCurve,
    pub color_grading: ColorGrading,
    /// True when the reference is monochrome and the source is not.
    pub grayscale_recommended: bool,
}

/// Clamp to the shared slider range.
pub(crate) fn clamp_slider(value: i32) -> i32 {
    value.clamp(SLIDER_MIN, SLIDER_MAX)
}

/// Truncate toward zero, then clamp. NaN maps to 0.
pub(crate) fn truncate_slider(value: f64) -> i32 {
    clamp_slider(value as i32)
}

/// Round half away from zero, then clamp. NaN maps to 0.
pub(crate) fn round_slider(value: f64) -> i32 {
    clamp_slider(value.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_index_matches_table_order() {
        for (i, band) in HueBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }

    #[test]
    fn test_default_band_adjustments_are_neutral() {
        let bands = HueBandAdjustments::default();
        assert!(bands.iter().all(|(_, adj)| adj == BandAdjustment::NEUTRAL));
        assert_eq!(bands.iter().count(), 8);
    }

    #[test]
    fn test_set_band_only_touches_that_band() {
        let mut bands = HueBandAdjustments::default();
        let adj = BandAdjustment {
            hue: 5,
            saturation: -3,
            luminance: 12,
        };
        bands.set(HueBand::Aqua, adj);
        assert_eq!(bands.get(HueBand::Aqua), adj);
        assert_eq!(bands.get(HueBand::Blue), BandAdjustment::NEUTRAL);
    }

    #[test]
    fn test_anchored_curve_wraps_points() {
        let curve = ToneCurve::new(vec![(30, 40), (128, 120)]);
        let knots: Vec<_> = curve.anchored().collect();
        assert_eq!(knots, vec![(0, 0), (30, 40), (128, 120), (255, 255)]);
    }

    #[test]
    fn test_empty_curve_is_identity() {
        let knots: Vec<_> = ToneCurve::default().anchored().collect();
        assert_eq!(knots, vec![ToneCurve::START, ToneCurve::END]);
    }

    #[test]
    fn test_slider_conversions_truncate_and_round() {
        assert_eq!(truncate_slider(-12.9), -12);
        assert_eq!(truncate_slider(250.0), 100);
        assert_eq!(round_slider(-12.5), -13);
        assert_eq!(round_slider(-250.0), -100);
        assert_eq!(truncate_slider(f64::NAN), 0);
    }

    #[test]
    fn test_adjustment_set_json_roundtrip() {
        let mut set = AdjustmentSet::default();
        set.tone.exposure = 1.02;
        set.tone_curve = ToneCurve::new(vec![(20, 25)]);
        set.grayscale_recommended = true;

        let json = serde_json::to_string(&set).unwrap();
        let back: AdjustmentSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
