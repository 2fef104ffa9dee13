use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Turning-point detection parameters.
///
/// The two knobs select how strict the direction-change rule is.
/// [`DetectionConfig::PURE`] counts every nonzero x movement and accepts
/// every reversal; [`DetectionConfig::STRICT`] ignores jitter below 1.5%
/// of the frame width and debounces reversals by ten samples, the settings
/// the tracker's own throw analysis uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum |dx| between consecutive samples to count as movement.
    /// 0 = every nonzero delta counts.
    pub min_delta_x: f64,
    /// Samples that must pass after an accepted turning point before the
    /// next reversal is considered. 0 = no debouncing.
    pub min_frame_gap: usize,
}

impl DetectionConfig {
    pub const PURE: Self = Self {
        min_delta_x: 0.0,
        min_frame_gap: 0,
    };

    pub const STRICT: Self = Self {
        min_delta_x: 0.015,
        min_frame_gap: 10,
    };

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.min_delta_x.is_finite() || self.min_delta_x < 0.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "min_delta_x must be a finite value >= 0, got {}",
                self.min_delta_x
            )));
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::PURE
    }
}

/// How many consecutive turning points make up one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stride {
    /// `(i, i+1)`: every turning point ends one segment and starts the next.
    #[default]
    Pairs,
    /// `(i, i+1, i+2)` stepping by 2; the middle point is carried along
    /// but the angle spans first to last.
    Triples,
}

impl Stride {
    /// Number of turning points per segment.
    pub fn point_count(self) -> usize {
        match self {
            Stride::Pairs => 2,
            Stride::Triples => 3,
        }
    }
}

impl TryFrom<u8> for Stride {
    type Error = AnalysisError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Stride::Pairs),
            3 => Ok(Stride::Triples),
            other => Err(AnalysisError::InvalidConfiguration(format!(
                "stride must be 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<Stride> for u8 {
    fn from(stride: Stride) -> u8 {
        stride.point_count() as u8
    }
}

/// All analysis parameters in one struct.
/// Serializable so presets can be kept as small JSON files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detection: DetectionConfig,
    pub stride: Stride,
}

impl AnalysisConfig {
    pub fn new(detection: DetectionConfig, stride: Stride) -> Self {
        Self { detection, stride }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.detection.validate()
    }

    /// Parse a JSON preset. Missing fields fall back to defaults.
    ///
    /// Any malformed value (negative gap, stride 4, ...) is reported as
    /// [`AnalysisError::InvalidConfiguration`].
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| AnalysisError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
