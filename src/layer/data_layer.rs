use log::{debug, info, warn};
use ndarray::Axis;

use super::{Blob, Layer};
use crate::config::{LayerParams, Phase};
use crate::data::index::SplitIndex;
use crate::data::model::Sample;
use crate::data::preprocess::{load_image, load_label};
use crate::data::sampler::Sampler;
use crate::error::{LayerError, Result};

/// Where the layer's parameters stand: still the raw param string, or parsed.
#[derive(Debug)]
enum Params {
    Raw(String),
    Parsed(LayerParams),
}

/// Everything that only exists once the layer is set up.
#[derive(Debug)]
struct Loaded {
    index: SplitIndex,
    sampler: Sampler,
}

/// Feeds (image, importance map) pairs one at a time, reshaping its tops to
/// each sample so images of any size pass through a fully convolutional net.
///
/// Tops: `data` (`1 x 3 x H x W`) and `label` (`1 x 1 x H x W`). No bottoms.
#[derive(Debug)]
pub struct ImportanceDataLayer {
    phase: Phase,
    params: Params,
    loaded: Option<Loaded>,
    current: Option<Sample>,
}

impl ImportanceDataLayer {
    /// A layer whose parameters are parsed from `param_str` at setup.
    pub fn new(phase: Phase, param_str: impl Into<String>) -> Self {
        Self {
            phase,
            params: Params::Raw(param_str.into()),
            loaded: None,
            current: None,
        }
    }

    /// A layer with already parsed parameters.
    pub fn with_params(phase: Phase, params: LayerParams) -> Self {
        Self {
            phase,
            params: Params::Parsed(params),
            loaded: None,
            current: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Parsed parameters; `None` until setup when built from a param string.
    pub fn params(&self) -> Option<&LayerParams> {
        match &self.params {
            Params::Parsed(p) => Some(p),
            Params::Raw(_) => None,
        }
    }

    pub fn index(&self) -> Option<&SplitIndex> {
        self.loaded.as_ref().map(|l| &l.index)
    }

    /// Id of the sample the next reshape will load.
    pub fn current_id(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .and_then(|l| l.index.get(l.sampler.current()))
    }

    /// Load the current sample and move on, without going through blobs.
    pub fn next_sample(&mut self) -> Result<Sample> {
        let sample = self.load_current()?;
        self.advance()?;
        Ok(sample)
    }

    fn load_current(&self) -> Result<Sample> {
        let loaded = self.loaded.as_ref().ok_or(LayerError::NotSetUp)?;
        let params = self.params().ok_or(LayerError::NotSetUp)?;
        let id = &loaded.index.ids()[loaded.sampler.current()];

        let image = load_image(&params.image_path(self.phase, id), params.mean)?;
        let label = load_label(&params.label_path(self.phase, id), params.binarize)?;
        let sample = Sample {
            id: id.clone(),
            image,
            label,
        };

        if sample.spatial_dims().is_none() {
            warn!(
                "{id}: importance map {:?} doesn't match image {:?}",
                sample.label.dim(),
                sample.image.dim()
            );
        }
        Ok(sample)
    }

    fn advance(&mut self) -> Result<()> {
        let loaded = self.loaded.as_mut().ok_or(LayerError::NotSetUp)?;
        loaded.sampler.advance();
        Ok(())
    }
}

fn check_tops(top: &[Blob]) -> Result<()> {
    if top.len() != 2 {
        return Err(LayerError::TopCount { got: top.len() });
    }
    Ok(())
}

impl Layer for ImportanceDataLayer {
    fn type_name(&self) -> &'static str {
        match self.phase {
            Phase::Train => "MassvisTrainDataLayerBubble",
            Phase::Valid => "MassvisDataLayerBubble",
        }
    }

    fn setup(&mut self, bottom: &[Blob], top: &mut [Blob]) -> Result<()> {
        if let Params::Raw(s) = &self.params {
            self.params = Params::Parsed(LayerParams::from_param_str(s)?);
        }
        let Params::Parsed(params) = &self.params else {
            return Err(LayerError::NotSetUp);
        };

        check_tops(top)?;
        if !bottom.is_empty() {
            return Err(LayerError::BottomCount { got: bottom.len() });
        }

        let index = SplitIndex::load(&params.listing_path())?;
        let sampler = if params.effective_randomize() {
            Sampler::random(index.len(), params.seed)?
        } else {
            if params.randomize {
                debug!("split '{}' is not a training split, sampling in order", params.split);
            }
            Sampler::sequential(index.len())?
        };

        info!(
            "{} data layer: {} samples from {} ({} order, binarize={})",
            self.phase,
            index.len(),
            params.listing_path().display(),
            if sampler.is_random() { "random" } else { "listing" },
            params.binarize
        );

        self.loaded = Some(Loaded { index, sampler });
        self.current = None;
        Ok(())
    }

    fn reshape(&mut self, _bottom: &[Blob], top: &mut [Blob]) -> Result<()> {
        check_tops(top)?;
        let sample = self.load_current()?;
        top[0].reshape(&sample.image_blob_shape());
        top[1].reshape(&sample.label_blob_shape());
        self.current = Some(sample);
        Ok(())
    }

    fn forward(&mut self, _bottom: &[Blob], top: &mut [Blob]) -> Result<()> {
        check_tops(top)?;
        let sample = self.current.as_ref().ok_or(LayerError::NotReshaped)?;
        top[0].copy_from(sample.image.view().insert_axis(Axis(0)).into_dyn())?;
        top[1].copy_from(sample.label.view().insert_axis(Axis(0)).into_dyn())?;
        debug!("{} forward: {}", self.phase, sample.id);

        self.advance()
    }

    fn backward(
        &mut self,
        _top: &[Blob],
        _propagate_down: &[bool],
        _bottom: &mut [Blob],
    ) -> Result<()> {
        Ok(())
    }
}
