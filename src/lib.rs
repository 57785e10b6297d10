//! Data layers that feed (image, importance map) pairs from the MASSVIS
//! dataset to a fully convolutional network, one sample at a time.

pub mod config;
pub mod data;
pub mod error;
pub mod layer;

pub use config::{LayerParams, Phase};
pub use error::{LayerError, Result};
pub use layer::{Blob, ImportanceDataLayer, Layer};
