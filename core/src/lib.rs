// core holds the simplex noise, fBm accumulation and terrain coloring
pub mod colorize;
pub mod fbm2;
pub mod heightmap;
pub mod permutation;
pub mod simplex2;

use rand::Rng;

pub use colorize::{Band, Color, TerrainPalette, colorize, lerp, to_rgb_image};
pub use fbm2::{Fbm2D, FbmParams};
pub use heightmap::{FieldError, HeightMap2D, NoiseField, generate_field};
pub use permutation::{GradientTable, PermutationError, PermutationTable};
pub use simplex2::Simplex2D;

// noise generator that can sample a 2D point
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}

// Shuffle the tables from `rng` and fill a width×height field with fBm simplex noise
pub fn generate_terrain<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    params: FbmParams,
    rng: &mut R,
) -> Result<NoiseField, FieldError> {
    let fbm = Fbm2D::for_width(Simplex2D::from_rng(rng), params, width);
    generate_field(width, height, &fbm)
}
