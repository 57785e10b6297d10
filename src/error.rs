use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the data layers.
pub type Result<T> = std::result::Result<T, LayerError>;

/// Everything that can go wrong while wiring or running a data layer.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The param string could not be parsed into layer parameters.
    #[error("invalid layer parameters: {0}")]
    Config(String),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image file exists but could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The split listing contains no sample ids.
    #[error("split listing {} contains no sample ids", path.display())]
    EmptyIndex { path: PathBuf },

    /// A sampler was asked to pick from zero samples.
    #[error("cannot sample from an empty split")]
    EmptySplit,

    #[error("need two tops: data and label, got {got}")]
    TopCount { got: usize },

    #[error("data layers take no bottoms, got {got}")]
    BottomCount { got: usize },

    #[error("layer used before setup")]
    NotSetUp,

    #[error("forward called before reshape")]
    NotReshaped,

    /// A blob was written with an array of a different shape.
    #[error("shape mismatch: blob is {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("unknown layer type: {0}")]
    UnknownLayer(String),
}

impl LayerError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for LayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
