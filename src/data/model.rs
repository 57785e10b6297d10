use ndarray::Array3;

/// One preprocessed (image, importance map) pair.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Image basename as listed in the split file.
    pub id: String,
    /// `3 x H x W`, BGR, mean subtracted.
    pub image: Array3<f32>,
    /// `1 x H x W`, importance in `[0, 1]` or `{0, 1}` when binarized.
    pub label: Array3<f32>,
}

impl Sample {
    /// Height and width shared by image and label, or `None` if the
    /// importance map doesn't match its image.
    pub fn spatial_dims(&self) -> Option<(usize, usize)> {
        let (_, h, w) = self.image.dim();
        let (_, lh, lw) = self.label.dim();
        (h == lh && w == lw).then_some((h, w))
    }

    /// Blob shape of the image including the leading batch dimension.
    pub fn image_blob_shape(&self) -> [usize; 4] {
        batched(self.image.dim())
    }

    /// Blob shape of the label including the leading batch dimension.
    pub fn label_blob_shape(&self) -> [usize; 4] {
        batched(self.label.dim())
    }
}

fn batched((c, h, w): (usize, usize, usize)) -> [usize; 4] {
    [1, c, h, w]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(h: usize, w: usize, lh: usize, lw: usize) -> Sample {
        Sample {
            id: "s".into(),
            image: Array3::zeros((3, h, w)),
            label: Array3::zeros((1, lh, lw)),
        }
    }

    #[test]
    fn blob_shapes_carry_batch_dimension() {
        let s = sample(4, 5, 4, 5);
        assert_eq!(s.image_blob_shape(), [1, 3, 4, 5]);
        assert_eq!(s.label_blob_shape(), [1, 1, 4, 5]);
        assert_eq!(s.spatial_dims(), Some((4, 5)));
    }

    #[test]
    fn mismatched_label_detected() {
        assert_eq!(sample(4, 5, 5, 4).spatial_dims(), None);
    }
}
