use image::{Rgb, RgbImage};
use palette::Srgb;
use tracing::debug;

use crate::heightmap::NoiseField;

pub type Color = Srgb<u8>;

pub const FLOOD_LEVEL: f64 = 0.5;
pub const MOUNTAIN_LEVEL: f64 = 0.85;

// Band endpoints, RGB
const WATER_LOW: [u8; 3] = [0, 0, 55];
const WATER_HIGH: [u8; 3] = [0, 53, 106];
const LAND_LOW: [u8; 3] = [0, 64, 0];
const LAND_HIGH: [u8; 3] = [133, 182, 116];
const MOUNT_LOW: [u8; 3] = [167, 157, 147];
const MOUNT_HIGH: [u8; 3] = [216, 223, 226];

fn color(c: [u8; 3]) -> Color {
    Srgb::new(c[0], c[1], c[2])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    Water,
    Land,
    Mountain,
}

// Colors and threshold fractions used to paint a field
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainPalette {
    pub water: (Color, Color),
    pub land: (Color, Color),
    pub mountain: (Color, Color),
    // fraction of the observed range separating water from land
    pub flood: f64,
    // fraction of the observed range separating land from mountain
    pub mount: f64,
    // Clamp the interpolation factor to [0, 1] before blending.
    // Off reproduces raw extrapolation at band edges.
    pub clamp_lerp: bool,
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self {
            water: (color(WATER_LOW), color(WATER_HIGH)),
            land: (color(LAND_LOW), color(LAND_HIGH)),
            mountain: (color(MOUNT_LOW), color(MOUNT_HIGH)),
            flood: FLOOD_LEVEL,
            mount: MOUNTAIN_LEVEL,
            clamp_lerp: true,
        }
    }
}

// Absolute band edges for one field, measured from its minimum
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub diff: f64,
    pub flood: f64,
    pub mount: f64,
}

impl Thresholds {
    pub fn from_range(diff: f64, palette: &TerrainPalette) -> Self {
        Self {
            diff,
            flood: palette.flood * diff,
            mount: palette.mount * diff,
        }
    }

    // Water is strictly below flood, mountain strictly above mount, land takes both edges
    pub fn classify(&self, normalized: f64) -> Band {
        if normalized < self.flood {
            Band::Water
        } else if normalized > self.mount {
            Band::Mountain
        } else {
            Band::Land
        }
    }

    // Position inside the matched band, 0 at its lower edge
    pub fn band_position(&self, band: Band, normalized: f64) -> f64 {
        match band {
            Band::Water => normalized / self.flood,
            Band::Mountain => (normalized - self.mount) / (self.diff - self.mount),
            Band::Land => (normalized - self.flood) / (self.mount - self.flood),
        }
    }
}

// Per-channel blend that always walks from the smaller channel value toward the
// larger one, whichever argument holds it.
pub fn lerp(c1: Color, c2: Color, t: f64, clamp: bool) -> Color {
    // a flat field yields 0/0 at the band edge
    let t = if t.is_nan() { 0.0 } else { t };
    let t = if clamp { t.clamp(0.0, 1.0) } else { t };
    let channel = |a: u8, b: u8| -> u8 {
        let (low, high) = if a > b { (b, a) } else { (a, b) };
        let v = low as f64 + ((high - low) as f64 * t).round();
        v.clamp(0.0, 255.0) as u8
    };
    Srgb::new(
        channel(c1.red, c2.red),
        channel(c1.green, c2.green),
        channel(c1.blue, c2.blue),
    )
}

impl TerrainPalette {
    pub fn band_colors(&self, band: Band) -> (Color, Color) {
        match band {
            Band::Water => self.water,
            Band::Land => self.land,
            Band::Mountain => self.mountain,
        }
    }

    pub fn color_at(&self, thresholds: &Thresholds, normalized: f64) -> Color {
        let band = thresholds.classify(normalized);
        let (low, high) = self.band_colors(band);
        lerp(
            low,
            high,
            thresholds.band_position(band, normalized),
            self.clamp_lerp,
        )
    }
}

// One color per cell, bottom row first, left to right within a row.
// This is the scanline order of an uncompressed bitmap.
pub fn colorize(field: &NoiseField, palette: &TerrainPalette) -> Vec<Color> {
    let thresholds = Thresholds::from_range(field.range(), palette);
    debug!(
        diff = thresholds.diff,
        flood = thresholds.flood,
        mount = thresholds.mount,
        "colorizing field"
    );

    let mut out = Vec::with_capacity(field.width() * field.height());
    for row in field.map.rows().rev() {
        for &h in row {
            out.push(palette.color_at(&thresholds, h - field.min));
        }
    }
    out
}

// Same coloring, laid out top row first for the `image` crate
pub fn to_rgb_image(field: &NoiseField, palette: &TerrainPalette) -> RgbImage {
    let thresholds = Thresholds::from_range(field.range(), palette);
    let mut img = RgbImage::new(field.width() as u32, field.height() as u32);
    for (row, values) in field.map.rows().enumerate() {
        for (col, &h) in values.iter().enumerate() {
            let c = palette.color_at(&thresholds, h - field.min);
            img.put_pixel(col as u32, row as u32, Rgb([c.red, c.green, c.blue]));
        }
    }
    img
}

// Cells per band as (water, land, mountain)
pub fn band_histogram(field: &NoiseField, palette: &TerrainPalette) -> (usize, usize, usize) {
    let thresholds = Thresholds::from_range(field.range(), palette);
    field
        .map
        .as_slice()
        .iter()
        .fold((0, 0, 0), |(w, l, m), &h| {
            match thresholds.classify(h - field.min) {
                Band::Water => (w + 1, l, m),
                Band::Land => (w, l + 1, m),
                Band::Mountain => (w, l, m + 1),
            }
        })
}
