//! Writing a generation run to disk: the map image and a RON run report.

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::Serialize;
use tessera_config::{ExportConfig, ImageEncoding};
use tessera_terrain::{
    ElevationPalette, ExportError, GeneratedTerrain, GlobalRanges, Grayscale, Grayscale16,
    MapImage,
};
use tracing::{debug, info};

/// Errors raised while writing run outputs.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write map image: {0}")]
    Image(#[from] ExportError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] ron::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of one run, written next to the image.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub map_side_length: u32,
    pub ranges: GlobalRanges,
    pub layer_fractions: Vec<f32>,
    /// Prop positions as `(x, height, y)`, empty when scattering is off.
    pub props: Vec<DVec3>,
}

impl RunReport {
    pub fn new(terrain: &GeneratedTerrain, props: Vec<DVec3>) -> Self {
        Self {
            seed: terrain.settings().noise.seed,
            map_side_length: terrain.layout().map_side_length(),
            ranges: terrain.ranges(),
            layer_fractions: terrain.layer_histogram().fractions().to_vec(),
            props,
        }
    }
}

/// Encode the composite map with the configured encoding and write it as PNG.
pub fn write_map_image(
    terrain: &GeneratedTerrain,
    export: &ExportConfig,
) -> Result<PathBuf, OutputError> {
    let path = output_path(export, "png");
    create_parent(&path)?;

    let range = terrain.ranges().map;
    match export.encoding {
        ImageEncoding::Gray8 => terrain.render(&Grayscale { range }).save_png(&path)?,
        ImageEncoding::Gray16 => terrain.render(&Grayscale16 { range }).save_png(&path)?,
        ImageEncoding::LayerColor => {
            save_color_map(&terrain.render(&terrain.layer_shading()), &path)?;
        }
        ImageEncoding::Palette => {
            save_color_map(&terrain.render(&ElevationPalette { range }), &path)?;
        }
    }

    info!(path = %path.display(), encoding = ?export.encoding, "wrote map image");
    Ok(path)
}

/// Save an RGBA map and return how many distinct colors it uses.
fn save_color_map(image: &MapImage<[u8; 4]>, path: &Path) -> Result<usize, ExportError> {
    let colors = image.unique_color_count();
    debug!(colors, "rendered color map");
    image.save_png(path)?;
    Ok(colors)
}

/// Write `report` as pretty RON.
pub fn write_report(report: &RunReport, export: &ExportConfig) -> Result<PathBuf, OutputError> {
    let path = output_path(export, "ron");
    create_parent(&path)?;

    let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
    let serialized = ron::ser::to_string_pretty(report, pretty)?;
    std::fs::write(&path, serialized).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), props = report.props.len(), "wrote run report");
    Ok(path)
}

fn output_path(export: &ExportConfig, extension: &str) -> PathBuf {
    export
        .output_dir
        .join(&export.file_stem)
        .with_extension(extension)
}

fn create_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
