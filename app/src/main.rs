use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::colorize::band_histogram;
use terrain_core::{colorize, generate_terrain, to_rgb_image};
use terrain_storage::models::TerrainParams;
use terrain_storage::{StorageError, load_params, save_params, write_bmp};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Bmp,
    Png,
}

#[derive(Parser, Debug)]
#[command(name = "fbm-terrain")]
#[command(about = "Generate a color-banded terrain map from fractal simplex noise")]
struct Args {
    /// Width of the grid in pixels
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the grid in pixels
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of noise octaves summed per pixel
    #[arg(long)]
    octaves: Option<usize>,

    /// Amplitude multiplier per octave
    #[arg(long)]
    gain: Option<f64>,

    /// Frequency multiplier per octave
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Random seed (seeded from the clock if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Water/land boundary as a fraction of the height range
    #[arg(long)]
    flood: Option<f64>,

    /// Land/mountain boundary as a fraction of the height range
    #[arg(long)]
    mount: Option<f64>,

    /// Let band colors extrapolate instead of clamping at band edges
    #[arg(long)]
    no_clamp: bool,

    /// Read parameters from a TOML file (flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective parameters, including the seed, to a TOML file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "test.bmp")]
    output: PathBuf,

    /// Output image format
    #[arg(short, long, value_enum, default_value = "bmp")]
    format: OutputFormat,

    /// Print an HTML status page linking the image
    #[arg(long)]
    html: bool,
}

impl Args {
    fn merge_into(&self, mut params: TerrainParams) -> TerrainParams {
        if let Some(v) = self.width {
            params.width = v;
        }
        if let Some(v) = self.height {
            params.height = v;
        }
        if let Some(v) = self.octaves {
            params.octaves = v;
        }
        if let Some(v) = self.gain {
            params.gain = v;
        }
        if let Some(v) = self.lacunarity {
            params.lacunarity = v;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        if let Some(v) = self.flood {
            params.flood = v;
        }
        if let Some(v) = self.mount {
            params.mount = v;
        }
        if self.no_clamp {
            params.clamp_lerp = false;
        }
        params
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn run(args: &Args) -> Result<Duration, StorageError> {
    let start = Instant::now();

    let base = match &args.config {
        Some(path) => load_params(path)?,
        None => TerrainParams::default(),
    };
    let mut params = args.merge_into(base);
    params.validate()?;

    let seed = *params.seed.get_or_insert_with(clock_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    info!(
        seed,
        width = params.width,
        height = params.height,
        octaves = params.octaves,
        "generating terrain"
    );

    if let Some(path) = &args.save_config {
        save_params(path, &params)?;
        info!(path = %path.display(), "parameters saved");
    }

    let field = generate_terrain(params.width, params.height, params.fbm(), &mut rng)
        .map_err(|e| StorageError::InvalidParams(e.to_string()))?;
    info!(min = field.min, max = field.max, "noise field ready");

    let palette = params.palette();
    let (water, land, mountain) = band_histogram(&field, &palette);
    info!(water, land, mountain, "cells per band");

    match args.format {
        OutputFormat::Bmp => {
            let pixels = colorize(&field, &palette);
            write_bmp(&args.output, params.width, params.height, &pixels)?;
        }
        OutputFormat::Png => {
            to_rgb_image(&field, &palette)
                .save(&args.output)
                .map_err(|e| match e {
                    image::ImageError::IoError(io) => StorageError::Io(io),
                    other => StorageError::Serialize(other.to_string()),
                })?;
        }
    }
    info!(path = %args.output.display(), "image written");

    Ok(start.elapsed())
}

fn print_page(image: &str, elapsed: Duration) {
    println!("Content-Type: text/html\n");
    println!("<html><head><title>Fractal Terrain</title></head>");
    println!("<body>");
    println!("<h2>Fractal Terrain Generator</h2>");
    println!("<img src=\"{}\" /><br />", image);
    println!("This took {:?} to create.<br />", elapsed);
    println!("</body>");
    println!("</html>");
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout is reserved for the HTML page
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(elapsed) => {
            if args.html {
                print_page(&args.output.display().to_string(), elapsed);
            } else {
                println!("Saved {} in {:.2?}", args.output.display(), elapsed);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
