//! Process-backed implementation of the trainer seam.

use crate::trainer::{DetectionTrainer, TrainRequest, TrainingError};
use std::path::PathBuf;
use std::process::Command;

/// Trains by invoking an external detection CLI
/// (`<program> <task> train key=value ...`) and blocking until it exits.
#[derive(Debug, Clone)]
pub struct CommandTrainer {
    program: PathBuf,
}

impl CommandTrainer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(request: &TrainRequest) -> Vec<String> {
        fn toggle(key: &str, on: bool) -> String {
            format!("{key}={}", if on { "True" } else { "False" })
        }
        vec![
            request.task.as_str().to_string(),
            "train".to_string(),
            format!("data={}", request.manifest.display()),
            format!("model={}", request.model_weights.display()),
            format!("epochs={}", request.epochs),
            format!("imgsz={}", request.image_size),
            format!("batch={}", request.batch_size),
            format!("workers={}", request.workers),
            format!("device={}", request.device),
            format!("project={}", request.project.display()),
            format!("name={}", request.run_name),
            toggle("save", request.save),
            format!("patience={}", request.patience),
            toggle("augment", request.augmentation.augment),
            toggle("mosaic", request.augmentation.mosaic),
            toggle("mixup", request.augmentation.mixup),
        ]
    }
}

impl DetectionTrainer for CommandTrainer {
    fn train(&mut self, request: &TrainRequest) -> Result<(), TrainingError> {
        let status = Command::new(&self.program)
            .args(Self::args(request))
            .status()
            .map_err(|source| TrainingError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(TrainingError::Collaborator {
                status,
                run_name: request.run_name.clone(),
            });
        }
        Ok(())
    }
}
