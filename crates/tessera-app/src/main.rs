//! Command-line terrain generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p tessera-app -- --seed 7 --map-dimension 4` to
//! write `output/terrain.png` and `output/terrain.ron`.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tessera_config::{CliArgs, Config, ConfigError, default_config_dir};
use tessera_terrain::{TerrainError, TerrainGenerator, default_thread_count};
use tracing::{error, info};

use crate::output::{OutputError, RunReport};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.join("logs");
    tessera_log::init_logging(Some(&log_dir), config.debug.log_to_file, Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terrain generation failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the config directory, load or create `config.ron`, and apply CLI
/// overrides. Only a missing file falls back to defaults; unreadable,
/// unparsable or invalid settings are errors, including after overrides.
fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), ConfigError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };

    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config, config_dir))
}

fn run(config: &Config) -> Result<(), AppError> {
    let threads = match config.generation.threads {
        0 => default_thread_count(),
        n => n,
    };
    let mut generator = TerrainGenerator::new(threads);
    let terrain = generator.generate(&config.map)?;

    let ranges = terrain.ranges();
    info!(
        noise_min = ranges.noise.min,
        noise_max = ranges.noise.max,
        height_min = ranges.map.min,
        height_max = ranges.map.max,
        "global ranges"
    );

    let histogram = terrain.layer_histogram();
    for (index, (fraction, start)) in histogram
        .fractions()
        .iter()
        .zip(histogram.start_heights())
        .enumerate()
    {
        info!(
            layer = index,
            start_height = start,
            percent = fraction * 100.0,
            "layer coverage"
        );
    }

    let material = terrain.material_params(config.generation.origin_height);
    info!(
        layers = material.layer_count,
        min_height = material.min_height,
        max_height = material.max_height,
        "material parameters"
    );

    output::write_map_image(terrain, &config.export)?;

    let mut props = Vec::new();
    if config.export.write_placements {
        let placed = terrain.scatter_props(&config.scatter, |position| props.push(position));
        info!(props = placed, min_distance = config.scatter.min_distance, "scattered props");
    }
    output::write_report(&RunReport::new(terrain, props), &config.export)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_config::CONFIG_FILE_NAME;
    use tessera_terrain::ConfigurationError;

    fn args_for(dir: &std::path::Path) -> CliArgs {
        CliArgs {
            config: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_map_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "(map: (chunk_side_length: 0, map_dimension: 1))",
        )
        .unwrap();

        let err = load_config(&args_for(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidMap(ConfigurationError::ZeroChunkSideLength)
        ));
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();

        let err = load_config(&args_for(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            map_dimension: Some(0),
            ..args_for(dir.path())
        };

        let err = load_config(&args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidMap(ConfigurationError::ZeroMapDimension)
        ));
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            seed: Some(11),
            ..args_for(dir.path())
        };

        let (config, config_dir) = load_config(&args).unwrap();
        assert_eq!(config_dir, dir.path());
        assert_eq!(config.map.noise.seed, 11);
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }
}
