//! Error types for settings validation, generation, and image export.

/// Invalid or inconsistent [`MapSettings`](crate::MapSettings), detected before
/// any chunk is generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The map must contain at least one chunk per side.
    #[error("map dimension must be at least 1")]
    ZeroMapDimension,

    /// Chunks must have a positive side length.
    #[error("chunk side length must be at least 1")]
    ZeroChunkSideLength,

    /// At least one noise octave is required.
    #[error("noise octave count must be at least 1")]
    ZeroOctaves,

    /// Noise scale divides world coordinates and must be positive.
    #[error("noise scale must be positive and finite, got {0}")]
    InvalidNoiseScale(f64),

    /// A numeric setting is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The height-response curve has no keys.
    #[error("height curve must contain at least one key")]
    EmptyHeightCurve,

    /// Curve keys must be strictly increasing in time.
    #[error("height curve key {index} is not after the previous key (time {time})")]
    UnsortedCurveKeys {
        /// Index of the first out-of-order key.
        index: usize,
        /// Its time value.
        time: f32,
    },

    /// A layer's normalized start height is outside `[0, 1]`.
    #[error("layer {index} height {height} is outside [0, 1]")]
    LayerHeightOutOfRange {
        /// Layer index.
        index: usize,
        /// The rejected height.
        height: f32,
    },

    /// A layer's blend strength is outside `[0, 1]`.
    #[error("layer {index} blend strength {blend} is outside [0, 1]")]
    BlendStrengthOutOfRange {
        /// Layer index.
        index: usize,
        /// The rejected blend strength.
        blend: f32,
    },

    /// Two layers share the same start height.
    #[error("layers {first} and {second} share height {height}")]
    DuplicateLayerHeight {
        /// Index of the earlier layer.
        first: usize,
        /// Index of the later layer.
        second: usize,
        /// The shared height.
        height: f32,
    },

    /// Layers are not sorted by ascending start height.
    #[error("layer {index} (height {height}) is below the previous layer")]
    UnsortedLayers {
        /// Index of the first out-of-order layer.
        index: usize,
        /// Its height.
        height: f32,
    },

    /// The map side length `map_dimension · chunk_side_length` does not fit
    /// in a `u32`.
    #[error("map of {map_dimension} chunks of side {chunk_side_length} is too large")]
    MapTooLarge {
        map_dimension: u32,
        chunk_side_length: u32,
    },
}

/// Errors returned by [`TerrainGenerator::generate`](crate::TerrainGenerator::generate).
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The settings failed validation; nothing was generated.
    #[error("invalid map settings: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A chunk worker thread panicked.
    #[error("chunk worker thread panicked")]
    WorkerPanicked,

    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn chunk worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Errors that can occur while encoding or writing a map image.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),

    /// Writing the encoded file failed.
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    /// The image has a zero dimension and cannot be encoded.
    #[error("cannot export an empty {width}x{height} image")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}
