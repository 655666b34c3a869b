//! The external training collaborator seam and its typed artifacts.

use data_contracts::TaskKind;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Augmentation toggles forwarded verbatim to the collaborator; their
/// semantics live entirely on the other side of the seam.
#[derive(Debug, Clone, Copy)]
pub struct AugmentationFlags {
    pub augment: bool,
    pub mosaic: bool,
    pub mixup: bool,
}

impl Default for AugmentationFlags {
    fn default() -> Self {
        Self {
            augment: true,
            mosaic: true,
            mixup: true,
        }
    }
}

/// Everything the external trainer needs for one stage run.
#[derive(Debug, Clone)]
pub struct TrainRequest {
    pub manifest: PathBuf,
    pub task: TaskKind,
    pub model_weights: PathBuf,
    pub epochs: u32,
    pub image_size: u32,
    pub batch_size: u32,
    pub workers: u32,
    pub device: String,
    pub project: PathBuf,
    pub run_name: String,
    pub save: bool,
    pub patience: u32,
    pub augmentation: AugmentationFlags,
}

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("failed to launch trainer {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("trainer exited with {status} for run {run_name}")]
    Collaborator { status: ExitStatus, run_name: String },
    #[error("no weight artifact at {path} after training")]
    MissingArtifact { path: PathBuf },
}

/// Weight artifact handed from one stage to the next. The first stage wraps
/// an externally supplied pretrained file; later stages resolve the path a
/// completed run is contracted to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightArtifact {
    path: PathBuf,
}

impl WeightArtifact {
    pub fn pretrained(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the artifact a completed training run must have produced;
    /// a run that reports success without the file is a training failure.
    pub fn from_completed_run(path: PathBuf) -> Result<Self, TrainingError> {
        if path.is_file() {
            Ok(Self { path })
        } else {
            Err(TrainingError::MissingArtifact { path })
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Lifecycle of one progressive stage. A stage only starts once its
/// predecessor reaches `Completed`, whose artifact becomes its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageState {
    Pending,
    Running,
    Completed(WeightArtifact),
}

impl StageState {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageState::Completed(_))
    }
}

/// External training collaborator. One call trains one stage to completion
/// and is atomic from the outside: it either returns success or fails.
pub trait DetectionTrainer {
    fn train(&mut self, request: &TrainRequest) -> Result<(), TrainingError>;
}
