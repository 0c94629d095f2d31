use std::fmt;

use rand::Rng;

pub const TABLE_SIZE: usize = 256;
pub const GRADIENT_COUNT: usize = 8;

// Shuffled lookup table that assigns a pseudo-random gradient to every lattice corner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE],
}

#[derive(Debug, PartialEq, Eq)]
pub enum PermutationError {
    // Table must hold exactly 256 entries
    WrongLength(usize),
    // Every value 0..=255 must appear once
    Duplicate(u8),
}

impl fmt::Display for PermutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermutationError::WrongLength(n) => {
                write!(f, "permutation table needs {} entries, got {}", TABLE_SIZE, n)
            }
            PermutationError::Duplicate(v) => {
                write!(f, "permutation table contains {} more than once", v)
            }
        }
    }
}

impl std::error::Error for PermutationError {}

impl PermutationTable {
    pub fn identity() -> Self {
        let mut perm = [0u8; TABLE_SIZE];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { perm }
    }

    // Start from the identity, then swap every position with a uniformly drawn one.
    // Each value still appears exactly once whatever the random source returns.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table = Self::identity();
        for i in 0..TABLE_SIZE {
            let j = rng.gen_range(0..TABLE_SIZE);
            table.perm.swap(i, j);
        }
        table
    }

    // Build from a fixed table, e.g. to reproduce a known terrain in tests
    pub fn from_values(values: &[u8]) -> Result<Self, PermutationError> {
        if values.len() != TABLE_SIZE {
            return Err(PermutationError::WrongLength(values.len()));
        }
        let mut seen = [false; TABLE_SIZE];
        let mut perm = [0u8; TABLE_SIZE];
        for (slot, &v) in perm.iter_mut().zip(values) {
            if seen[v as usize] {
                return Err(PermutationError::Duplicate(v));
            }
            seen[v as usize] = true;
            *slot = v;
        }
        Ok(Self { perm })
    }

    // Lattice coordinates can be negative, so wrap with Euclidean remainder
    #[inline]
    pub fn get(&self, i: i64) -> usize {
        self.perm[i.rem_euclid(TABLE_SIZE as i64) as usize] as usize
    }

    // Double lookup so the result depends on both lattice coordinates
    #[inline]
    pub fn hash2(&self, x: i64, y: i64) -> usize {
        self.get(x + self.get(y) as i64)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

// 8 unit vectors spaced π/4 apart around the unit circle
#[derive(Clone, Debug, PartialEq)]
pub struct GradientTable {
    grads: [(f64, f64); GRADIENT_COUNT],
}

impl GradientTable {
    pub fn new() -> Self {
        let mut grads = [(0.0, 0.0); GRADIENT_COUNT];
        for (i, g) in grads.iter_mut().enumerate() {
            let angle = std::f64::consts::FRAC_PI_4 * i as f64;
            *g = (angle.cos(), angle.sin());
        }
        Self { grads }
    }

    #[inline]
    pub fn get(&self, index: usize) -> (f64, f64) {
        self.grads[index % GRADIENT_COUNT]
    }

    #[inline]
    pub fn dot(&self, index: usize, x: f64, y: f64) -> f64 {
        let (gx, gy) = self.get(index);
        gx * x + gy * y
    }
}

impl Default for GradientTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_is_permutation(table: &PermutationTable) {
        let mut seen = [0u32; TABLE_SIZE];
        for &v in table.as_slice() {
            seen[v as usize] += 1;
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn shuffle_keeps_every_value_once() {
        for seed in [0u64, 1, 42, 2025, u64::MAX] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_is_permutation(&PermutationTable::shuffled(&mut rng));
        }
    }

    #[test]
    fn shuffle_with_degenerate_source_is_still_a_permutation() {
        // Always returns the same raw value
        let mut rng = StepRng::new(0, 0);
        assert_is_permutation(&PermutationTable::shuffled(&mut rng));
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let a = PermutationTable::shuffled(&mut ChaCha8Rng::seed_from_u64(7));
        let b = PermutationTable::shuffled(&mut ChaCha8Rng::seed_from_u64(7));
        let c = PermutationTable::shuffled(&mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn from_values_rejects_bad_tables() {
        assert_eq!(
            PermutationTable::from_values(&[0, 1, 2]),
            Err(PermutationError::WrongLength(3))
        );
        let mut values: Vec<u8> = (0..=255).collect();
        values[10] = 3;
        assert_eq!(
            PermutationTable::from_values(&values),
            Err(PermutationError::Duplicate(3))
        );
    }

    #[test]
    fn lookups_wrap_negative_coordinates() {
        let values: Vec<u8> = (0..=255).rev().collect();
        let table = PermutationTable::from_values(&values).unwrap();
        assert_eq!(table.get(0), 255);
        assert_eq!(table.get(-1), 0);
        assert_eq!(table.get(256), 255);
        // perm[(3 + perm[5]) mod 256] = perm[(3 + 250) mod 256] = perm[253]
        assert_eq!(table.hash2(3, 5), 2);
    }

    #[test]
    fn gradients_are_unit_vectors() {
        let grads = GradientTable::new();
        for i in 0..GRADIENT_COUNT {
            let (x, y) = grads.get(i);
            assert!(((x * x + y * y) - 1.0).abs() < 1e-12);
        }
        let (x, y) = grads.get(2);
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        // index wraps mod 8
        assert_eq!(grads.get(9), grads.get(1));
    }
}
