// storage writes finished terrains to disk and persists run parameters

pub mod bmp;
pub mod error;
pub mod models;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use crate::bmp::{bmp_file_size, encode_bmp, write_bmp};
pub use crate::error::StorageError;
use crate::models::TerrainParams;

// Read a TOML parameter file; missing keys keep their defaults
pub fn load_params(path: &Path) -> Result<TerrainParams, StorageError> {
    let text = fs::read_to_string(path)?;
    let params: TerrainParams = toml::from_str(&text)?;
    params.validate()?;
    debug!(path = %path.display(), "parameters loaded");
    Ok(params)
}

pub fn save_params(path: &Path, params: &TerrainParams) -> Result<(), StorageError> {
    let text = toml::to_string_pretty(params)?;
    fs::write(path, text)?;
    debug!(path = %path.display(), "parameters saved");
    Ok(())
}
