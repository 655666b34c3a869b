//! The progressive pipeline: stage datasets built in order, weights chained
//! from each completed stage into the next.

use crate::stages::{StageConfig, StageSchedule};
use crate::trainer::{
    AugmentationFlags, DetectionTrainer, StageState, TrainRequest, TrainingError, WeightArtifact,
};
use data_contracts::{ClassRegistry, TaskKind};
use dataset_prep::{build_stage_dataset, GroupMap, PrepError, SplitAssignment, StageLayout};
use std::path::PathBuf;
use thiserror::Error;

/// Cause of a failed stage.
#[derive(Debug, Error)]
pub enum StageFailure {
    #[error(transparent)]
    Prep(#[from] PrepError),
    #[error(transparent)]
    Training(#[from] TrainingError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Grouping or split assignment failed before any stage started.
    #[error(transparent)]
    Prep(#[from] PrepError),
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: usize,
        #[source]
        source: StageFailure,
    },
}

/// Explicit configuration for one progressive run; components share no
/// process-wide state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub schedule: StageSchedule,
    pub registry: ClassRegistry,
    pub universe: Vec<String>,
    pub val_ids: Vec<String>,
    pub base_weights: PathBuf,
    pub epochs: u32,
    pub patience: u32,
    pub workers: u32,
    pub device: String,
    pub augmentation: AugmentationFlags,
}

/// One stage's configuration and lifecycle state. Returned runs are always
/// `Completed`; a failed stage aborts the pipeline instead.
#[derive(Debug, Clone)]
pub struct StageRun {
    pub stage: usize,
    pub config: StageConfig,
    pub state: StageState,
}

impl StageRun {
    pub fn artifact(&self) -> Option<&WeightArtifact> {
        match &self.state {
            StageState::Completed(artifact) => Some(artifact),
            _ => None,
        }
    }
}

/// The final model: the last completed stage's artifact.
pub fn final_artifact(runs: &[StageRun]) -> Option<&WeightArtifact> {
    runs.last().and_then(StageRun::artifact)
}

/// Run every stage in schedule order, chaining each completed stage's weight
/// artifact into the next stage's starting weights. The split is validated
/// and the source directory grouped once, before any filesystem writes.
pub fn run_progressive<T: DetectionTrainer>(
    trainer: &mut T,
    config: &PipelineConfig,
) -> Result<Vec<StageRun>, PipelineError> {
    let split = SplitAssignment::assign(&config.universe, &config.val_ids)?;
    let groups = GroupMap::scan(&config.source_dir, &config.universe)?;

    let mut weights = WeightArtifact::pretrained(&config.base_weights);
    let mut runs = Vec::with_capacity(config.schedule.len());
    for (idx, stage) in config.schedule.stages().iter().enumerate() {
        let number = idx + 1;
        println!(
            "Starting progression step {number} with imgsz={}, batch_size={}...",
            stage.image_size, stage.batch_size
        );
        let artifact = run_stage(trainer, config, &split, &groups, *stage, number, &weights)
            .map_err(|source| PipelineError::Stage {
                stage: number,
                source,
            })?;
        println!(
            "Step {number} completed. Updated weights: {}",
            artifact.path().display()
        );
        weights = artifact.clone();
        runs.push(StageRun {
            stage: number,
            config: *stage,
            state: StageState::Completed(artifact),
        });
    }
    Ok(runs)
}

fn run_stage<T: DetectionTrainer>(
    trainer: &mut T,
    config: &PipelineConfig,
    split: &SplitAssignment,
    groups: &GroupMap,
    stage: StageConfig,
    number: usize,
    weights: &WeightArtifact,
) -> Result<WeightArtifact, StageFailure> {
    let layout = StageLayout::for_stage(&config.output_dir, number);
    build_stage_dataset(&config.source_dir, &layout, split, groups, &config.registry)?;
    println!("data.yaml written to {}", layout.manifest_path.display());

    let request = TrainRequest {
        manifest: layout.manifest_path.clone(),
        task: TaskKind::Obb,
        model_weights: weights.path().to_path_buf(),
        epochs: config.epochs,
        image_size: stage.image_size,
        batch_size: stage.batch_size,
        workers: config.workers,
        device: config.device.clone(),
        project: layout.root.clone(),
        run_name: layout.run_name(),
        save: true,
        patience: config.patience,
        augmentation: config.augmentation,
    };

    println!("Training on step {number}...");
    trainer.train(&request)?;
    let artifact = WeightArtifact::from_completed_run(layout.weights_path())?;
    Ok(artifact)
}
