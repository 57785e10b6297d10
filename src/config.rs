use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{LayerError, Result};

// ---------------------------------------------------------------------------
// Phase – which half of the dataset a layer reads from
// ---------------------------------------------------------------------------

/// Training or validation. Decides the image / label sub-directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Phase {
    Train,
    Valid,
}

impl Phase {
    /// Directory holding the input images, relative to the dataset folder.
    pub fn image_subdir(self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Valid => "valid",
        }
    }

    /// Directory holding the importance maps, relative to the dataset folder.
    pub fn label_subdir(self) -> &'static str {
        match self {
            Phase::Train => "train_imp",
            Phase::Valid => "valid_imp",
        }
    }
}

impl FromStr for Phase {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(Phase::Train),
            "valid" | "val" | "validation" => Ok(Phase::Valid),
            other => Err(LayerError::config(format!("unknown phase '{other}'"))),
        }
    }
}

impl TryFrom<String> for Phase {
    type Error = LayerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.image_subdir())
    }
}

// ---------------------------------------------------------------------------
// LayerParams – the param string handed to a data layer
// ---------------------------------------------------------------------------

fn default_randomize() -> bool {
    true
}

fn default_dataset() -> String {
    "massvis".to_string()
}

/// Parameters of a data layer, parsed from the JSON param string of the
/// network definition:
///
/// ```json
/// {
///   "train_dir": "/path/to/data",
///   "split": "train",
///   "mean": [104.00698793, 116.66876762, 122.67891434],
///   "seed": 1337,
///   "binarize": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerParams {
    /// Root directory that contains the dataset folder.
    #[serde(alias = "train_dir", alias = "val_dir")]
    pub data_dir: PathBuf,
    /// Stem of the listing file (`{split}.txt`).
    pub split: String,
    /// Per-channel mean, B, G, R order.
    pub mean: [f32; 3],
    #[serde(default = "default_randomize")]
    pub randomize: bool,
    /// Seed for the random sampler; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Threshold importance maps into {0, 1} instead of scaling to [0, 1].
    #[serde(default)]
    pub binarize: bool,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Only consulted when a layer is created by its generic name.
    #[serde(default)]
    pub phase: Option<Phase>,
}

impl LayerParams {
    pub fn from_param_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(LayerError::config("empty param string"));
        }
        Ok(serde_json::from_str(s)?)
    }

    /// Randomization only applies to training splits; evaluation stays
    /// deterministic.
    pub fn effective_randomize(&self) -> bool {
        self.randomize && self.split.contains("train")
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.data_dir.join(&self.dataset)
    }

    pub fn listing_path(&self) -> PathBuf {
        self.dataset_dir().join(format!("{}.txt", self.split))
    }

    pub fn image_path(&self, phase: Phase, id: &str) -> PathBuf {
        png_path(&self.dataset_dir().join(phase.image_subdir()), id)
    }

    pub fn label_path(&self, phase: Phase, id: &str) -> PathBuf {
        png_path(&self.dataset_dir().join(phase.label_subdir()), id)
    }
}

fn png_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN_PARAMS: &str = r#"{
        "train_dir": "/data",
        "split": "train",
        "mean": [104.0, 116.0, 122.0],
        "seed": 7,
        "binarize": true
    }"#;

    #[test]
    fn parses_legacy_train_key() {
        let p = LayerParams::from_param_str(TRAIN_PARAMS).unwrap();
        assert_eq!(p.data_dir, PathBuf::from("/data"));
        assert_eq!(p.split, "train");
        assert_eq!(p.mean, [104.0, 116.0, 122.0]);
        assert_eq!(p.seed, Some(7));
        assert!(p.binarize);
        assert!(p.randomize);
        assert_eq!(p.dataset, "massvis");
        assert_eq!(p.phase, None);
    }

    #[test]
    fn parses_legacy_val_key_with_defaults() {
        let p = LayerParams::from_param_str(
            r#"{"val_dir": "/v", "split": "valid", "mean": [1, 2, 3]}"#,
        )
        .unwrap();
        assert_eq!(p.data_dir, PathBuf::from("/v"));
        assert_eq!(p.seed, None);
        assert!(!p.binarize);
    }

    #[test]
    fn missing_mean_is_config_error() {
        let err = LayerParams::from_param_str(r#"{"data_dir": "/d", "split": "train"}"#)
            .unwrap_err();
        assert!(matches!(err, LayerError::Config(_)));
    }

    #[test]
    fn mean_must_have_three_channels() {
        let err = LayerParams::from_param_str(
            r#"{"data_dir": "/d", "split": "train", "mean": [1, 2]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LayerError::Config(_)));
    }

    #[test]
    fn empty_param_string_rejected() {
        assert!(LayerParams::from_param_str("  ").is_err());
    }

    #[test]
    fn eval_splits_never_randomize() {
        let mut p = LayerParams::from_param_str(TRAIN_PARAMS).unwrap();
        assert!(p.effective_randomize());

        p.split = "valid".into();
        assert!(!p.effective_randomize());

        p.split = "train_small".into();
        p.randomize = false;
        assert!(!p.effective_randomize());
    }

    #[test]
    fn layout_paths() {
        let p = LayerParams::from_param_str(TRAIN_PARAMS).unwrap();
        assert_eq!(p.listing_path(), PathBuf::from("/data/massvis/train.txt"));
        assert_eq!(
            p.image_path(Phase::Train, "vis_01"),
            PathBuf::from("/data/massvis/train/vis_01.png")
        );
        assert_eq!(
            p.label_path(Phase::Valid, "vis_01"),
            PathBuf::from("/data/massvis/valid_imp/vis_01.png")
        );
    }

    #[test]
    fn phase_from_str() {
        assert_eq!("Train".parse::<Phase>().unwrap(), Phase::Train);
        assert_eq!("val".parse::<Phase>().unwrap(), Phase::Valid);
        assert!("test".parse::<Phase>().is_err());
    }

    #[test]
    fn phase_key_deserializes() {
        let p = LayerParams::from_param_str(
            r#"{"data_dir": "/d", "split": "valid", "mean": [0, 0, 0], "phase": "valid"}"#,
        )
        .unwrap();
        assert_eq!(p.phase, Some(Phase::Valid));
    }
}
