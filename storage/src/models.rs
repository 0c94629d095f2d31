use serde::{Deserialize, Serialize};
use terrain_core::colorize::{FLOOD_LEVEL, MOUNTAIN_LEVEL};
use terrain_core::fbm2::{DEFAULT_GAIN, DEFAULT_LACUNARITY, DEFAULT_OCTAVES};
use terrain_core::{FbmParams, TerrainPalette};

use crate::error::StorageError;

pub const DEFAULT_SIZE: usize = 500;

// Everything needed to reproduce one terrain image.
// Missing keys in a parameter file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub width: usize,
    pub height: usize,
    pub octaves: usize,
    pub gain: f64,
    pub lacunarity: f64,
    // None seeds from the clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub flood: f64,
    pub mount: f64,
    pub clamp_lerp: bool,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            octaves: DEFAULT_OCTAVES,
            gain: DEFAULT_GAIN,
            lacunarity: DEFAULT_LACUNARITY,
            seed: None,
            flood: FLOOD_LEVEL,
            mount: MOUNTAIN_LEVEL,
            clamp_lerp: true,
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.width == 0 || self.height == 0 {
            return Err(StorageError::InvalidParams(format!(
                "grid must not be empty (got {}x{})",
                self.width, self.height
            )));
        }
        if !self.gain.is_finite() || !self.lacunarity.is_finite() {
            return Err(StorageError::InvalidParams(
                "gain and lacunarity must be finite".into(),
            ));
        }
        if !(0.0 < self.flood && self.flood < self.mount && self.mount < 1.0) {
            return Err(StorageError::InvalidParams(format!(
                "thresholds must satisfy 0 < flood < mount < 1 (got flood={}, mount={})",
                self.flood, self.mount
            )));
        }
        Ok(())
    }

    pub fn fbm(&self) -> FbmParams {
        FbmParams {
            octaves: self.octaves,
            gain: self.gain,
            lacunarity: self.lacunarity,
        }
    }

    pub fn palette(&self) -> TerrainPalette {
        TerrainPalette {
            flood: self.flood,
            mount: self.mount,
            clamp_lerp: self.clamp_lerp,
            ..TerrainPalette::default()
        }
    }
}
