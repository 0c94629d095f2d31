// Generates and saves two 256×256 previews of the same field:
// raw heights as grayscale
// water / land / mountain color bands

use std::path::Path;

use image::{GrayImage, Luma};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::{FbmParams, NoiseField, TerrainPalette, generate_terrain, to_rgb_image};

fn save_grayscale(field: &NoiseField, filename: &str) {
    let range = field.range();
    let mut img = GrayImage::new(field.width() as u32, field.height() as u32);
    for (y, row) in field.map.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let norm = if range.abs() < f64::EPSILON {
                0.5
            } else {
                (v - field.min) / range
            };
            let gray = (norm * 255.0).round() as u8;
            img.put_pixel(x as u32, y as u32, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    let size = 256;
    let mut rng = ChaCha8Rng::seed_from_u64(2025);
    let field = generate_terrain(size, size, FbmParams::default(), &mut rng).unwrap();
    println!("Height range: {:.4} to {:.4}", field.min, field.max);

    save_grayscale(&field, "terrain_heights.png");

    let colored = to_rgb_image(&field, &TerrainPalette::default());
    colored.save(Path::new("terrain_bands.png")).unwrap();
    println!("Saved terrain_bands.png");
}
