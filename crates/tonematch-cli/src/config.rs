//! Run configuration for the command line tool.
//!
//! A single JSON file may carry both the analysis constants and the preset
//! boilerplate:
//! ```json
//! { "analysis": { "tone": { "exposure_divisor": 40.0 } },
//!   "preset": { "name": "Warm Film", "grain_amount": 20 } }
//! ```
//! Missing sections and fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tonematch_core::{AnalysisConfig, ConfigError, PresetDefaults};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "TONEMATCH_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub analysis: AnalysisConfig,
    pub preset: PresetDefaults,
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.analysis.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load from `path`, else from `$TONEMATCH_CONFIG`, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
