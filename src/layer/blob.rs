use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::{LayerError, Result};

/// An `f32` buffer with a dynamic shape, exchanged between layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    data: ArrayD<f32>,
}

impl Default for Blob {
    fn default() -> Self {
        Self::new()
    }
}

impl Blob {
    /// An empty blob of shape `[0]`.
    pub fn new() -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(&[0])),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Resize to `shape`. Contents are reset to zero.
    pub fn reshape(&mut self, shape: &[usize]) {
        if self.shape() != shape {
            self.data = ArrayD::zeros(IxDyn(shape));
        } else {
            self.data.fill(0.0);
        }
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }

    /// Overwrite the contents with `src`, which must match the current shape
    /// exactly; reshape first.
    pub fn copy_from(&mut self, src: ArrayViewD<'_, f32>) -> Result<()> {
        if src.shape() != self.shape() {
            return Err(LayerError::ShapeMismatch {
                expected: self.shape().to_vec(),
                got: src.shape().to_vec(),
            });
        }
        self.data.assign(&src);
        Ok(())
    }
}
