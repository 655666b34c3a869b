//! Process-backed implementation of the predictor seam.

use crate::report::ImagePrediction;
use crate::runner::{DetectionPredictor, InferenceError, PredictRequest};
use std::path::PathBuf;
use std::process::Command;

/// Predicts by invoking an external program that prints a JSON array with
/// one result object per input image on stdout.
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: PathBuf,
}

impl CommandPredictor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(request: &PredictRequest) -> Vec<String> {
        let mut args = vec![
            "--task".to_string(),
            request.task.as_str().to_string(),
            "--model".to_string(),
            request.weights.display().to_string(),
            "--imgsz".to_string(),
            request.image_size.to_string(),
            "--conf".to_string(),
            request.confidence.to_string(),
        ];
        for image in &request.images {
            args.push(image.display().to_string());
        }
        args
    }
}

impl DetectionPredictor for CommandPredictor {
    fn predict(
        &mut self,
        request: &PredictRequest,
    ) -> Result<Vec<ImagePrediction>, InferenceError> {
        let output = Command::new(&self.program)
            .args(Self::args(request))
            .output()
            .map_err(|source| InferenceError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(InferenceError::Collaborator {
                status: output.status,
            });
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|source| InferenceError::Output { source })
    }
}
