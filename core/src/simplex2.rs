use rand::Rng;

use crate::NoiseGenerator;
use crate::permutation::{GradientTable, PermutationTable};

// Approximate value of sqrt(3)
const SQRT_3: f64 = 1.732_050_807_568_877_293_5;
// Skewing/Unskewing factors for 2D simplex
pub const F2: f64 = 0.5 * (SQRT_3 - 1.0); // squashes the square grid into a rhombus of equilateral triangles
pub const G2: f64 = (3.0 - SQRT_3) / 6.0; // reverses the skewing
// Squared radius of influence around each corner
const RADIUS_SQ: f64 = 0.5;

// One lattice vertex of the triangle enclosing a sample point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub i: i64,
    pub j: i64,
    // Offset from the corner to the sample point, in normal space
    pub dx: f64,
    pub dy: f64,
}

// 2D simplex noise, single octave, without output scaling.
// Octave summation lives in `Fbm2D`.
pub struct Simplex2D {
    perm: PermutationTable,
    grads: GradientTable,
}

impl Simplex2D {
    pub fn new(perm: PermutationTable) -> Self {
        Self {
            perm,
            grads: GradientTable::new(),
        }
    }

    // Shuffle a fresh permutation table from the given random source
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(PermutationTable::shuffled(rng))
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    // Bottom, middle and top corners of the simplex containing (xin, yin)
    pub fn corners(xin: f64, yin: f64) -> [Corner; 3] {
        // Skew input space to determine simplex cell
        let s = (xin + yin) * F2;
        // floor, not truncation, so negative inputs land in the right cell
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        // Unskew back to get the offset from the base corner
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower triangle steps along x first, upper triangle along y
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        [
            Corner { i, j, dx: x0, dy: y0 },
            Corner {
                i: i + i1,
                j: j + j1,
                dx: x1,
                dy: y1,
            },
            Corner {
                i: i + 1,
                j: j + 1,
                dx: x2,
                dy: y2,
            },
        ]
    }

    // Radial falloff kernel: t^4 * (gradient . offset), zero outside the radius
    #[inline]
    fn contribution(&self, c: &Corner) -> f64 {
        let t = RADIUS_SQ - c.dx * c.dx - c.dy * c.dy;
        if t < 0.0 {
            return 0.0;
        }
        let gi = self.perm.hash2(c.i, c.j);
        let t_sq = t * t;
        t_sq * t_sq * self.grads.dot(gi, c.dx, c.dy)
    }

    // Raw 2D simplex noise at (xin, yin): plain sum of the three corner terms
    pub fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        Self::corners(xin, yin)
            .iter()
            .map(|c| self.contribution(c))
            .sum()
    }
}

impl NoiseGenerator for Simplex2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{Corner, Simplex2D};
    use crate::NoiseGenerator;
    use crate::permutation::PermutationTable;

    #[test]
    fn simplex2_determinism() {
        let s1 = Simplex2D::from_rng(&mut ChaCha8Rng::seed_from_u64(9999));
        let s2 = Simplex2D::from_rng(&mut ChaCha8Rng::seed_from_u64(9999));
        let a = s1.get2(1.23, 4.56);
        let b = s2.get2(1.23, 4.56);
        assert_eq!(a, b);
    }

    #[test]
    fn simplex2_is_zero_on_lattice_points() {
        // Every corner offset at a lattice point is either 0 or outside the radius
        let s = Simplex2D::from_rng(&mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(s.raw_noise(0.0, 0.0), 0.0);
    }

    #[test]
    fn corner_selection_picks_triangle_by_offset() {
        // x offset larger than y -> lower triangle
        let [b, m, t] = Simplex2D::corners(0.4, 0.1);
        assert_eq!((b.i, b.j), (0, 0));
        assert_eq!((m.i, m.j), (1, 0));
        assert_eq!((t.i, t.j), (1, 1));

        let [_, m, _] = Simplex2D::corners(0.1, 0.4);
        assert_eq!((m.i, m.j), (0, 1));
    }

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        let [b, _, _] = Simplex2D::corners(-0.25, -0.25);
        assert_eq!((b.i, b.j), (-1, -1));
        // Offsets from the base corner stay inside the unit cell
        assert!(b.dx >= 0.0 && b.dy >= 0.0);
    }

    #[test]
    fn raw_noise_matches_hand_computed_octave() {
        let values: Vec<u8> = (0..=255).rev().collect();
        let s = Simplex2D::new(PermutationTable::from_values(&values).unwrap());
        let (x, y) = (0.3, 0.7);
        let expected: f64 = Simplex2D::corners(x, y)
            .iter()
            .map(|&Corner { i, j, dx, dy }| {
                let t = 0.5 - dx * dx - dy * dy;
                if t < 0.0 {
                    return 0.0;
                }
                // perm[k] = 255 - k for the reversed table
                let inner = 255 - j.rem_euclid(256);
                let gi = 255 - (i + inner).rem_euclid(256);
                let angle = std::f64::consts::FRAC_PI_4 * (gi % 8) as f64;
                t.powi(4) * (angle.cos() * dx + angle.sin() * dy)
            })
            .sum();
        assert!((s.raw_noise(x, y) - expected).abs() < 1e-15);
    }
}
