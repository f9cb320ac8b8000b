//! Command-line argument parsing for the Tessera terrain tool.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::ImageEncoding;

/// Tessera command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tessera", about = "Chunked procedural terrain generator")]
pub struct CliArgs {
    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chunks per map side.
    #[arg(long)]
    pub map_dimension: Option<u32>,

    /// Quads per chunk side.
    #[arg(long)]
    pub chunk_side_length: Option<u32>,

    /// Noise scale in world units.
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Height multiplier applied after the height curve.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Minimum distance between scattered props.
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Seed for prop scattering.
    #[arg(long)]
    pub scatter_seed: Option<u64>,

    /// Skip prop scattering.
    #[arg(long)]
    pub no_scatter: bool,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Map image encoding.
    #[arg(long, value_enum)]
    pub encoding: Option<ImageEncoding>,

    /// Output directory for the image and placements.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.map.noise.seed = seed;
        }
        if let Some(d) = args.map_dimension {
            self.map.map_dimension = d;
        }
        if let Some(s) = args.chunk_side_length {
            self.map.chunk_side_length = s;
        }
        if let Some(scale) = args.noise_scale {
            self.map.noise.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.map.noise.octaves = octaves;
        }
        if let Some(h) = args.height_scale {
            self.map.height_scale = h;
        }
        if let Some(r) = args.min_distance {
            self.scatter.min_distance = r;
        }
        if let Some(seed) = args.scatter_seed {
            self.scatter.seed = seed;
        }
        if args.no_scatter {
            self.export.write_placements = false;
        }
        if let Some(threads) = args.threads {
            self.generation.threads = threads;
        }
        if let Some(encoding) = args.encoding {
            self.export.encoding = encoding;
        }
        if let Some(ref dir) = args.output {
            self.export.output_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
