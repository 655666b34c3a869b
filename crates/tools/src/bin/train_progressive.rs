use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use data_contracts::ClassRegistry;
use dataset_prep::numeric_universe;
use pyrovision_tools::config::DEFAULT_CONFIG_NAME;
use pyrovision_tools::ToolConfig;
use training::{
    final_artifact, run_progressive, AugmentationFlags, CommandTrainer, PipelineConfig,
    StageSchedule,
};

#[derive(Parser, Debug)]
#[command(
    name = "train_progressive",
    about = "Train the firework OBB detector across progressive resolutions"
)]
struct Args {
    /// Tool configuration file (TOML); a missing file falls back to defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
    config: PathBuf,
    /// Directory of grouped training images and annotations.
    #[arg(long)]
    source: Option<PathBuf>,
    /// Output root for per-stage datasets and runs.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Starting weights for the first stage.
    #[arg(long)]
    weights: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = ToolConfig::load(&args.config);
    if let Some(source) = args.source {
        cfg.source_dir = source;
    }
    if let Some(output) = args.output {
        cfg.output_dir = output;
    }
    if let Some(weights) = args.weights {
        cfg.base_weights = weights;
    }

    let pipeline = PipelineConfig {
        source_dir: cfg.source_dir.clone(),
        output_dir: cfg.output_dir.clone(),
        schedule: StageSchedule::progressive_default(),
        registry: ClassRegistry::fireworks(),
        universe: numeric_universe(cfg.group_count),
        val_ids: cfg.val_groups.clone(),
        base_weights: cfg.base_weights.clone(),
        epochs: cfg.epochs,
        patience: cfg.patience,
        workers: cfg.workers,
        device: cfg.device.clone(),
        augmentation: AugmentationFlags::default(),
    };

    let mut trainer = CommandTrainer::new(&cfg.trainer_bin);
    let runs = run_progressive(&mut trainer, &pipeline).context("progressive training failed")?;
    if let Some(artifact) = final_artifact(&runs) {
        println!("Final weights: {}", artifact.path().display());
    }
    Ok(())
}
