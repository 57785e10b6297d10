use log::debug;

use super::{ImportanceDataLayer, Layer};
use crate::config::{LayerParams, Phase};
use crate::error::{LayerError, Result};

/// Layer names as they appear in network definitions.
pub const TRAIN_LAYER: &str = "MassvisTrainDataLayerBubble";
pub const VALID_LAYER: &str = "MassvisDataLayerBubble";
/// Generic name; the phase comes from the `phase` param, defaulting to train.
pub const GENERIC_LAYER: &str = "ImportanceData";

pub const LAYER_NAMES: [&str; 3] = [TRAIN_LAYER, VALID_LAYER, GENERIC_LAYER];

/// Instantiate a data layer by the name a network definition uses for it.
pub fn create_layer(name: &str, param_str: &str) -> Result<Box<dyn Layer>> {
    let layer = match name {
        TRAIN_LAYER => ImportanceDataLayer::new(Phase::Train, param_str),
        VALID_LAYER => ImportanceDataLayer::new(Phase::Valid, param_str),
        GENERIC_LAYER => {
            let params = LayerParams::from_param_str(param_str)?;
            let phase = params.phase.unwrap_or(Phase::Train);
            ImportanceDataLayer::with_params(phase, params)
        }
        other => return Err(LayerError::UnknownLayer(other.to_string())),
    };
    debug!("created {name} ({} phase)", layer.phase());
    Ok(Box::new(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = r#"{"data_dir": "/d", "split": "valid", "mean": [0, 0, 0]}"#;

    #[test]
    fn legacy_names_map_to_phases() {
        let train = create_layer(TRAIN_LAYER, PARAMS).unwrap();
        assert_eq!(train.type_name(), TRAIN_LAYER);
        let valid = create_layer(VALID_LAYER, PARAMS).unwrap();
        assert_eq!(valid.type_name(), VALID_LAYER);
    }

    #[test]
    fn generic_name_reads_phase_param() {
        let layer = create_layer(GENERIC_LAYER, PARAMS).unwrap();
        assert_eq!(layer.type_name(), TRAIN_LAYER);

        let valid = r#"{"data_dir": "/d", "split": "valid", "mean": [0, 0, 0], "phase": "valid"}"#;
        let layer = create_layer(GENERIC_LAYER, valid).unwrap();
        assert_eq!(layer.type_name(), VALID_LAYER);
    }

    #[test]
    fn generic_name_validates_params_eagerly() {
        assert!(matches!(
            create_layer(GENERIC_LAYER, "{}"),
            Err(LayerError::Config(_))
        ));
    }

    #[test]
    fn unknown_name_rejected() {
        let err = create_layer("PascalDataLayer", PARAMS).err().unwrap();
        assert!(matches!(err, LayerError::UnknownLayer(name) if name == "PascalDataLayer"));
    }
}
