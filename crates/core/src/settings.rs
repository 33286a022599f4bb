//! Generation settings: how many colors, which mode, which HSL ranges.
//!
//! Settings deserialize from partial JSON; any field left out takes its
//! default, so a config file only needs the values it changes.

use crate::error::PaletteError;
use crate::generator::{GenerationMode, HslRanges};
use serde::{Deserialize, Serialize};

/// Colors per palette unless configured otherwise.
pub const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub count: usize,
    pub mode: GenerationMode,
    pub ranges: HslRanges,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            mode: GenerationMode::Random,
            ranges: HslRanges::default(),
        }
    }
}

impl GeneratorSettings {
    /// Parses settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that the count is non-zero and the ranges are well-formed.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.count == 0 {
            return Err(PaletteError::InvalidCount(self.count));
        }
        self.ranges.validate()
    }
}
