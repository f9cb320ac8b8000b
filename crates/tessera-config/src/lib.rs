//! Configuration for the Tessera terrain tool.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line, and wrap the terrain crate's own [`MapSettings`] and
//! [`ScatterSettings`] so one file describes a full generation run.
//!
//! [`MapSettings`]: tessera_terrain::MapSettings
//! [`ScatterSettings`]: tessera_terrain::ScatterSettings

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, ExportConfig, GenerationConfig, ImageEncoding,
    default_config_dir,
};
pub use error::ConfigError;
