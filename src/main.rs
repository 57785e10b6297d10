use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use ndarray::ArrayD;

use massvis_loader::{Blob, ImportanceDataLayer, Layer, Phase};

const USAGE: &str = "usage: massvis-loader <params.json> [train|valid] [steps]";
const DEFAULT_STEPS: usize = 10;

/// Command line: `<params.json> [phase] [steps]`.
#[derive(Debug, PartialEq)]
struct Args {
    params_path: PathBuf,
    phase: Phase,
    steps: usize,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = args.into_iter();
    let Some(params_path) = args.next().map(PathBuf::from) else {
        bail!("{USAGE}");
    };
    let phase = match args.next() {
        Some(s) => s.parse().with_context(|| format!("phase '{s}' ({USAGE})"))?,
        None => Phase::Train,
    };
    let steps = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("steps '{s}' is not a number"))?,
        None => DEFAULT_STEPS,
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument '{extra}' ({USAGE})");
    }

    Ok(Args {
        params_path,
        phase,
        steps,
    })
}

fn read_params(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Min, max and mean of a blob's contents.
fn stats(data: &ArrayD<f32>) -> (f32, f32, f32) {
    let (min, max) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let mean = data.mean().unwrap_or(f32::NAN);
    (min, max, mean)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    let param_str = read_params(&args.params_path)?;
    let mut layer = ImportanceDataLayer::new(args.phase, param_str);

    // Same wiring a network definition gives a data layer.
    let bottom: Vec<Blob> = Vec::new();
    let mut top = vec![Blob::new(), Blob::new()];

    layer.setup(&bottom, &mut top).context("layer setup")?;

    for step in 0..args.steps {
        layer
            .reshape(&bottom, &mut top)
            .with_context(|| format!("reshape at step {step}"))?;
        layer
            .forward(&bottom, &mut top)
            .with_context(|| format!("forward at step {step}"))?;

        let (dmin, dmax, dmean) = stats(top[0].data());
        let (lmin, lmax, lmean) = stats(top[1].data());
        info!(
            "step {step}: data {:?} [{dmin:.1}, {dmax:.1}] mean {dmean:.2} | label {:?} [{lmin:.2}, {lmax:.2}] mean {lmean:.3}",
            top[0].shape(),
            top[1].shape(),
        );
        println!("{step}\t{:?}\t{:?}", top[0].shape(), top[1].shape());
    }

    Ok(())
}
