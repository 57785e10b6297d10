use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A filled rectangle standing in for a chart element.
struct Mark {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    color: [u8; 3],
}

fn gaussian(d2: f64, sigma: f64) -> f64 {
    (-d2 / (2.0 * sigma.powi(2))).exp()
}

fn random_marks(rng: &mut StdRng, width: u32, height: u32) -> Vec<Mark> {
    let n = rng.random_range(2..6);
    (0..n)
        .map(|_| {
            let w = rng.random_range(width / 10..width / 3);
            let h = rng.random_range(height / 10..height / 2);
            Mark {
                x: rng.random_range(0..width - w),
                y: rng.random_range(0..height - h),
                w,
                h,
                color: [rng.random(), rng.random(), rng.random()],
            }
        })
        .collect()
}

fn render_image(marks: &[Mark], width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for m in marks {
        for y in m.y..m.y + m.h {
            for x in m.x..m.x + m.w {
                img.put_pixel(x, y, Rgb(m.color));
            }
        }
    }
    img
}

/// Importance peaks at the centre of every mark and falls off with distance.
fn render_importance(marks: &[Mark], width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let v = marks
            .iter()
            .map(|m| {
                let cx = f64::from(m.x) + f64::from(m.w) / 2.0;
                let cy = f64::from(m.y) + f64::from(m.h) / 2.0;
                let d2 = (f64::from(x) - cx).powi(2) + (f64::from(y) - cy).powi(2);
                gaussian(d2, f64::from(m.w.max(m.h)) / 2.0)
            })
            .fold(0.0, f64::max);
        Luma([(v * 255.0).round() as u8])
    })
}

fn write_split(
    dataset: &Path,
    split: &str,
    img_dir: &str,
    imp_dir: &str,
    count: usize,
    rng: &mut StdRng,
) -> Result<()> {
    let img_dir = dataset.join(img_dir);
    let imp_dir = dataset.join(imp_dir);
    fs::create_dir_all(&img_dir).with_context(|| format!("creating {}", img_dir.display()))?;
    fs::create_dir_all(&imp_dir).with_context(|| format!("creating {}", imp_dir.display()))?;

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let id = format!("{split}_{i:03}");
        // Sizes vary so the layers have to reshape between samples.
        let width = rng.random_range(64..=160);
        let height = rng.random_range(48..=120);
        let marks = random_marks(rng, width, height);

        let img_path = img_dir.join(format!("{id}.png"));
        render_image(&marks, width, height)
            .save(&img_path)
            .with_context(|| format!("writing {}", img_path.display()))?;
        let imp_path = imp_dir.join(format!("{id}.png"));
        render_importance(&marks, width, height)
            .save(&imp_path)
            .with_context(|| format!("writing {}", imp_path.display()))?;

        ids.push(id);
    }

    let listing = dataset.join(format!("{split}.txt"));
    fs::write(&listing, ids.join("\n") + "\n")
        .with_context(|| format!("writing {}", listing.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    let dataset = root.join("massvis");
    let mut rng = StdRng::seed_from_u64(42);

    write_split(&dataset, "train", "train", "train_imp", 24, &mut rng)?;
    write_split(&dataset, "valid", "valid", "valid_imp", 8, &mut rng)?;

    let params = serde_json::json!({
        "data_dir": root.to_string_lossy(),
        "split": "train",
        "mean": [104.00698793, 116.66876762, 122.67891434],
        "seed": 1337,
        "binarize": false,
    });
    let params_path = root.join("params.json");
    fs::write(&params_path, serde_json::to_string_pretty(&params)?)
        .with_context(|| format!("writing {}", params_path.display()))?;

    println!(
        "Wrote 24 train / 8 valid samples to {} (params: {})",
        dataset.display(),
        params_path.display()
    );
    Ok(())
}
