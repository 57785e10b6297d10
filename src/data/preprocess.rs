use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, ImageReader};
use log::debug;
use ndarray::Array3;

use crate::error::{LayerError, Result};

/// Importance values strictly above two thirds of full scale count as
/// important when binarizing.
pub const BINARIZE_THRESHOLD: f32 = 255.0 * 2.0 / 3.0;

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| LayerError::io(path, e))?
        .decode()
        .map_err(|source| match source {
            image::ImageError::IoError(e) => LayerError::io(path, e),
            source => LayerError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })
}

/// Load an input image and preprocess it for the network.
/// See [`image_to_tensor`].
pub fn load_image(path: &Path, mean: [f32; 3]) -> Result<Array3<f32>> {
    let img = decode(path)?;
    if img.color().has_alpha() {
        debug!("{}: compositing alpha onto white", path.display());
    }
    Ok(image_to_tensor(&img, mean))
}

/// Load an importance map as a `1 x H x W` label.
/// See [`label_to_tensor`].
pub fn load_label(path: &Path, binarize: bool) -> Result<Array3<f32>> {
    let img = decode(path)?;
    Ok(label_to_tensor(&img.to_luma8(), binarize))
}

// ---------------------------------------------------------------------------
// Pixel transforms
// ---------------------------------------------------------------------------

/// Convert a decoded image into the network's input layout:
///
/// * float per pixel, on the 0..=255 scale
/// * grayscale replicated into three channels
/// * alpha composited onto a white background
/// * RGB -> BGR
/// * `mean[c]` subtracted from BGR channel `c`
/// * `3 x H x W` (channel, row, column)
pub fn image_to_tensor(img: &DynamicImage, mean: [f32; 3]) -> Array3<f32> {
    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    let mut out = Array3::<f32>::zeros((3, height as usize, width as usize));
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let alpha = f32::from(a) / 255.0;
        let over_white = |c: u8| f32::from(c) * alpha + 255.0 * (1.0 - alpha);
        let bgr = [over_white(b), over_white(g), over_white(r)];
        for (c, value) in bgr.into_iter().enumerate() {
            out[[c, y as usize, x as usize]] = value - mean[c];
        }
    }
    out
}

/// Scale an 8-bit importance map to `[0, 1]`, or threshold it at
/// [`BINARIZE_THRESHOLD`] into `{0, 1}`, and prepend the singleton channel
/// axis the loss expects.
pub fn label_to_tensor(img: &GrayImage, binarize: bool) -> Array3<f32> {
    let (width, height) = img.dimensions();
    Array3::from_shape_fn((1, height as usize, width as usize), |(_, y, x)| {
        let v = f32::from(img.get_pixel(x as u32, y as u32).0[0]);
        if binarize {
            if v > BINARIZE_THRESHOLD {
                1.0
            } else {
                0.0
            }
        } else {
            v / 255.0
        }
    })
}
