use std::fmt;

use tracing::debug;

use crate::NoiseGenerator;

// 2D height map: row-major flat storage of width×height cells.
// access as `map.get(col, row)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap2D {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl HeightMap2D {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == width),
            "all rows must have the same length"
        );
        Self {
            width,
            height,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.width && row < self.height);
        row * self.width + col
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.data[self.index(col, row)]
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        let idx = self.index(col, row);
        self.data[idx] = value;
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[f64]> {
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    // (min, max) over every cell, None for an empty map
    pub fn extrema(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FieldError {
    EmptyGrid { width: usize, height: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EmptyGrid { width, height } => {
                write!(f, "grid must not be empty (got {}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for FieldError {}

// A fully populated height map together with its observed extrema.
// Colorizing needs the finished field, so min/max are collected while filling it.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    pub map: HeightMap2D,
    pub min: f64,
    pub max: f64,
}

impl NoiseField {
    pub fn from_map(map: HeightMap2D) -> Result<Self, FieldError> {
        let (min, max) = map.extrema().ok_or(FieldError::EmptyGrid {
            width: map.width(),
            height: map.height(),
        })?;
        Ok(Self { map, min, max })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn width(&self) -> usize {
        self.map.width()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }
}

// Sample `generator` at every (col, row) of a width×height grid in one pass
pub fn generate_field<N: NoiseGenerator + ?Sized>(
    width: usize,
    height: usize,
    generator: &N,
) -> Result<NoiseField, FieldError> {
    if width == 0 || height == 0 {
        return Err(FieldError::EmptyGrid { width, height });
    }

    let mut map = HeightMap2D::new(width, height);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for row in 0..height {
        for col in 0..width {
            let v = generator.get2(col as f64, row as f64);
            map.set(col, row, v);
            // both checks every time: the first cell must seed min and max
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
    }

    debug!(width, height, min, max, "noise field generated");
    Ok(NoiseField { map, min, max })
}
