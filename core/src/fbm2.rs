use crate::NoiseGenerator;
use crate::simplex2::Simplex2D;

pub const DEFAULT_OCTAVES: usize = 16;
pub const DEFAULT_GAIN: f64 = 0.65;
pub const DEFAULT_LACUNARITY: f64 = 2.0;

// gain scales the amplitude each octave, lacunarity scales the frequency
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FbmParams {
    pub octaves: usize,
    pub gain: f64,
    pub lacunarity: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            gain: DEFAULT_GAIN,
            lacunarity: DEFAULT_LACUNARITY,
        }
    }
}

// Fractal Brownian motion over simplex noise.
// Unlike the normalized generators, the sum is left unscaled: the colorizer
// works from the observed min/max instead.
pub struct Fbm2D {
    noise: Simplex2D,
    params: FbmParams,
    base_frequency: f64,
}

impl Fbm2D {
    pub fn new(noise: Simplex2D, params: FbmParams, base_frequency: f64) -> Self {
        Self {
            noise,
            params,
            base_frequency,
        }
    }

    // Base frequency of 1/width, so the first octave spans the whole grid
    pub fn for_width(noise: Simplex2D, params: FbmParams, width: usize) -> Self {
        Self::new(noise, params, 1.0 / width as f64)
    }

    pub fn params(&self) -> &FbmParams {
        &self.params
    }

    pub fn noise(&self) -> &Simplex2D {
        &self.noise
    }
}

impl NoiseGenerator for Fbm2D {
    // (x, y) are grid coordinates (column, row)
    fn get2(&self, x: f64, y: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut freq = self.base_frequency;
        let mut total = 0.0;

        for _ in 0..self.params.octaves {
            total += self.noise.raw_noise(x * freq, y * freq) * amplitude;
            amplitude *= self.params.gain;
            freq *= self.params.lacunarity;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{Fbm2D, FbmParams};
    use crate::NoiseGenerator;
    use crate::simplex2::Simplex2D;

    fn simplex(seed: u64) -> Simplex2D {
        Simplex2D::from_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn fbm2_single_octave_is_raw_noise() {
        let params = FbmParams {
            octaves: 1,
            gain: 123.0,
            lacunarity: 9.0,
        };
        let fbm = Fbm2D::for_width(simplex(3), params, 100);
        let reference = simplex(3);
        let freq = 1.0 / 100.0;
        for &(x, y) in &[(7.0, 3.0), (50.0, 99.0), (0.0, 12.0)] {
            assert_eq!(fbm.get2(x, y), reference.raw_noise(x * freq, y * freq));
        }
    }

    #[test]
    fn fbm2_sums_every_octave() {
        let params = FbmParams {
            octaves: 4,
            gain: 0.65,
            lacunarity: 2.0,
        };
        let fbm = Fbm2D::new(simplex(11), params, 0.01);
        let reference = simplex(11);
        let (x, y) = (37.0, 81.0);
        let mut expected = 0.0;
        let (mut amp, mut freq) = (1.0, 0.01);
        for _ in 0..4 {
            expected += reference.raw_noise(x * freq, y * freq) * amp;
            amp *= 0.65;
            freq *= 2.0;
        }
        assert_eq!(fbm.get2(x, y), expected);
    }

    #[test]
    fn fbm2_zero_octaves_is_flat() {
        let params = FbmParams {
            octaves: 0,
            ..FbmParams::default()
        };
        let fbm = Fbm2D::for_width(simplex(5), params, 10);
        assert_eq!(fbm.get2(3.0, 4.0), 0.0);
    }

    #[test]
    fn fbm2_defaults() {
        let p = FbmParams::default();
        assert_eq!(p.octaves, 16);
        assert_eq!(p.gain, 0.65);
        assert_eq!(p.lacunarity, 2.0);
    }
}
