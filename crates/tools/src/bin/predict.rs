use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use data_contracts::ClassRegistry;
use inference::{CommandPredictor, InferenceRunner};
use pyrovision_tools::config::DEFAULT_CONFIG_NAME;
use pyrovision_tools::ToolConfig;

#[derive(Parser, Debug)]
#[command(
    name = "predict",
    about = "Report firework OBB detections for every image in a directory"
)]
struct Args {
    /// Tool configuration file (TOML); a missing file falls back to defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
    config: PathBuf,
    /// Trained weights to predict with.
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Directory of candidate images.
    #[arg(long)]
    images: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = ToolConfig::load(&args.config);
    let weights = args.weights.unwrap_or_else(|| cfg.final_weights.clone());
    let image_dir = args.images.unwrap_or_else(|| cfg.test_dir.clone());

    let runner = InferenceRunner::new(
        ClassRegistry::fireworks(),
        cfg.inference_image_size,
        cfg.confidence,
    );
    let mut predictor = CommandPredictor::new(&cfg.predictor_bin);
    let reports = runner
        .run(&mut predictor, &weights, &image_dir)
        .context("prediction failed")?;

    for report in &reports {
        print!("\n{}", report.render());
    }
    Ok(())
}
