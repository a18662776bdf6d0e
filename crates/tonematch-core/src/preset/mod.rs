//! Develop-preset export.
//!
//! [`PresetSerializer`] turns an [`AdjustmentSet`] into a Camera Raw XMP
//! document. It formats values only; every number was already rounded and
//! clamped by the calculators. Unmodeled parameters come from
//! [`PresetDefaults`].

mod id;
mod xmp;

use std::io::Write;
use std::path::Path;

pub use id::PresetId;

use crate::adjustments::{AdjustmentSet, Zone};
use crate::config::PresetDefaults;
use crate::error::SerializationError;
use xmp::{Description, flag, signed, signed_hundredths};

/// A rendered preset, ready for its single write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDocument {
    id: PresetId,
    text: String,
}

impl PresetDocument {
    pub fn id(&self) -> &PresetId {
        &self.id
    }

    /// The UTF-8 document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn write_to(&self, mut writer: impl Write) -> Result<(), SerializationError> {
        writer.write_all(self.text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), SerializationError> {
        std::fs::write(path, self.text.as_bytes())?;
        tracing::info!(path = %path.display(), id = %self.id, "wrote preset");
        Ok(())
    }
}

/// Formats adjustment sets as XMP presets.
#[derive(Debug, Clone, Default)]
pub struct PresetSerializer {
    defaults: PresetDefaults,
}

impl PresetSerializer {
    pub fn new(defaults: PresetDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &PresetDefaults {
        &self.defaults
    }

    /// Render with a freshly generated identifier.
    pub fn render(&self, adjustments: &AdjustmentSet) -> Result<PresetDocument, SerializationError> {
        self.render_with_id(adjustments, PresetId::generate())
    }

    /// Render with a caller-supplied identifier.
    pub fn render_with_id(
        &self,
        adjustments: &AdjustmentSet,
        id: PresetId,
    ) -> Result<PresetDocument, SerializationError> {
        let d = &self.defaults;
        let tone = &adjustments.tone;
        check_finite("Exposure2012", tone.exposure)?;
        check_finite("SharpenRadius", d.sharpen_radius)?;

        let mut desc = Description::default();
        desc.attr("PresetType", "Normal")
            .attr("Cluster", "")
            .attr("UUID", &id)
            .attr("SupportsAmount", flag(false))
            .attr("SupportsColor", flag(true))
            .attr("SupportsMonochrome", flag(true))
            .attr("SupportsHighDynamicRange", flag(true))
            .attr("SupportsNormalDynamicRange", flag(true))
            .attr("SupportsSceneReferred", flag(true))
            .attr("SupportsOutputReferred", flag(true))
            .attr("CameraModelRestriction", "")
            .attr("Copyright", "")
            .attr("ContactInfo", "")
            .attr("Version", &d.version)
            .attr("ProcessVersion", &d.process_version)
            .attr("WhiteBalance", "As Shot")
            .attr("IncrementalTemperature", signed(tone.temperature))
            .attr("IncrementalTint", signed(tone.tint))
            .attr("Exposure2012", signed_hundredths(tone.exposure))
            .attr("Contrast2012", signed(tone.contrast))
            .attr("Highlights2012", signed(tone.highlights))
            .attr("Shadows2012", signed(tone.shadows))
            .attr("Whites2012", signed(tone.whites))
            .attr("Blacks2012", signed(tone.blacks))
            .attr("Texture", signed(tone.texture))
            .attr("Clarity2012", signed(tone.clarity))
            .attr("Dehaze", signed(tone.dehaze))
            .attr("Vibrance", signed(tone.vibrance))
            .attr("Saturation", signed(tone.saturation));

        for (band, adj) in adjustments.hue_bands.iter() {
            desc.attr(&format!("HueAdjustment{}", band.label()), signed(adj.hue))
                .attr(&format!("SaturationAdjustment{}", band.label()), signed(adj.saturation))
                .attr(&format!("LuminanceAdjustment{}", band.label()), signed(adj.luminance));
        }

        let grading = &adjustments.color_grading;
        for zone in Zone::ALL {
            let grade = grading.get(zone);
            let key = grade_key(zone);
            desc.attr(&format!("ColorGrade{key}Hue"), grade.hue)
                .attr(&format!("ColorGrade{key}Sat"), grade.saturation);
        }

        let [shadow_split, midtone_split, highlight_split] = d.parametric_splits;
        desc.attr("ColorGradeGlobalHue", d.color_grade_global_hue)
            .attr("ColorGradeGlobalSat", d.color_grade_global_saturation)
            .attr("ColorGradeBlending", d.color_grade_blending)
            .attr("SplitToningBalance", signed(grading.balance))
            .attr("ConvertToGrayscale", adjustments.grayscale_recommended)
            .attr("Sharpness", d.sharpness)
            .attr("SharpenRadius", format!("{:+.1}", d.sharpen_radius))
            .attr("SharpenDetail", d.sharpen_detail)
            .attr("SharpenEdgeMasking", d.sharpen_edge_masking)
            .attr("GrainAmount", d.grain_amount)
            .attr("GrainSize", d.grain_size)
            .attr("GrainFrequency", d.grain_frequency)
            .attr("ParametricShadowSplit", shadow_split)
            .attr("ParametricMidtoneSplit", midtone_split)
            .attr("ParametricHighlightSplit", highlight_split)
            .attr("ToneCurveName2012", "Custom")
            .attr("HasSettings", flag(true));

        desc.localized("Name", &d.name)
            .localized("Group", &d.group)
            .sequence(
                "ToneCurvePV2012",
                adjustments
                    .tone_curve
                    .anchored()
                    .map(|(input, output)| format!("{input}, {output}")),
            );

        let text = desc.finish(d.packet_wrapper);
        tracing::debug!(id = %id, bytes = text.len(), "rendered preset");
        Ok(PresetDocument { id, text })
    }
}

fn grade_key(zone: Zone) -> &'static str {
    match zone {
        Zone::Shadows => "Shadow",
        Zone::Midtones => "Midtone",
        Zone::Highlights => "Highlight",
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), SerializationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SerializationError::NonFinite { field, value })
    }
}
