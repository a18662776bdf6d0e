//! Tonematch Core — statistical color matching and develop-preset export.
//!
//! Given a reference and a source image, this crate derives the tone, color
//! band, split-tone, curve, and monochrome settings that push the source's
//! color statistics toward the reference, and renders them as a Camera Raw
//! (`crs:`) XMP preset. Pixels are never modified.

pub mod adjustments;
pub mod analysis;
pub mod color_space;
pub mod config;
pub mod error;
pub mod image;
pub mod preset;

// Re-exports for convenience.
pub use adjustments::{
    AdjustmentSet, BandAdjustment, ColorGrading, HueBand, HueBandAdjustments, ToneAdjustments,
    ToneCurve, Zone, ZoneGrade,
};
pub use analysis::{Analysis, MatchRequest, analyze};
pub use config::{AnalysisConfig, PresetDefaults};
pub use error::{
    AnalysisError, ConfigError, DegenerateStatisticsWarning, InvalidImageError, SerializationError,
};
pub use crate::image::{AnalysisImage, ImageRole};
pub use preset::{PresetDocument, PresetId, PresetSerializer};
