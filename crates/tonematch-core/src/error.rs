//! Error and warning types shared across the analysis and export stages.

use std::fmt;

use crate::image::ImageRole;

/// An input image that cannot be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidImageError {
    #[error("image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("image has {channels} channel(s), at least 3 are required")]
    MissingChannels { channels: u8 },
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Failure of a whole analysis run. No partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid {role} image: {source}")]
    InvalidImage {
        role: ImageRole,
        #[source]
        source: InvalidImageError,
    },
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Failure while rendering or writing a preset document.
///
/// The `AdjustmentSet` that was being rendered is untouched, so the caller
/// may retry with another destination.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("field `{field}` has non-finite value {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("`{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// A masked region selected no pixels and its calculation fell back to a
/// default or to the unmasked statistic. Processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegenerateStatisticsWarning {
    /// Calculator that hit the empty region, e.g. `"exposure"`.
    pub calculator: &'static str,
    /// Region that was empty, e.g. `"midtones"` or a band label.
    pub region: String,
    /// Image the mask was built on, if the condition is specific to one side.
    pub role: Option<ImageRole>,
    /// What was used instead.
    pub fallback: &'static str,
}

impl fmt::Display for DegenerateStatisticsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: empty region `{}`", self.calculator, self.region)?;
        if let Some(role) = self.role {
            write!(f, " in {role} image")?;
        }
        write!(f, ", using {}", self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_message_names_role() {
        let err = AnalysisError::InvalidImage {
            role: ImageRole::Source,
            source: InvalidImageError::MissingChannels { channels: 1 },
        };
        let msg = err.to_string();
        assert!(msg.contains("source"), "{msg}");
        assert!(msg.contains("1 channel"), "{msg}");
    }

    #[test]
    fn test_warning_display_mentions_fallback() {
        let warning = DegenerateStatisticsWarning {
            calculator: "exposure",
            region: "midtones".to_string(),
            role: Some(ImageRole::Reference),
            fallback: "global lightness difference",
        };
        assert_eq!(
            warning.to_string(),
            "exposure: empty region `midtones` in reference image, using global lightness difference"
        );
    }
}
