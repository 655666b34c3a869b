//! Directory scanning, the predictor seam, and report decoding.

use crate::report::{ImagePrediction, ImageReport, LabeledDetection};
use data_contracts::{ClassRegistry, TaskKind};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted as prediction inputs, matched case-insensitively.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 1] = ["png"];

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch predictor {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("predictor exited with {status}")]
    Collaborator { status: std::process::ExitStatus },
    #[error("predictor output was not valid JSON: {source}")]
    Output {
        #[source]
        source: serde_json::Error,
    },
    #[error("predictor returned {got} results for {expected} images")]
    ResultCountMismatch { got: usize, expected: usize },
}

/// Batched prediction request handed to the external collaborator.
#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub weights: PathBuf,
    pub task: TaskKind,
    pub images: Vec<PathBuf>,
    pub image_size: u32,
    pub confidence: f32,
}

/// External inference collaborator: one result per input image, input order
/// preserved.
pub trait DetectionPredictor {
    fn predict(&mut self, request: &PredictRequest)
        -> Result<Vec<ImagePrediction>, InferenceError>;
}

/// List supported images directly under `dir`, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, InferenceError> {
    let entries = fs::read_dir(dir).map_err(|source| InferenceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| InferenceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
            })
            .unwrap_or(false);
        if supported {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Runs batched prediction over a directory and decodes each detection's
/// class index for reporting.
#[derive(Debug, Clone)]
pub struct InferenceRunner {
    registry: ClassRegistry,
    image_size: u32,
    confidence: f32,
}

impl InferenceRunner {
    pub fn new(registry: ClassRegistry, image_size: u32, confidence: f32) -> Self {
        Self {
            registry,
            image_size,
            confidence,
        }
    }

    pub fn run<P: DetectionPredictor>(
        &self,
        predictor: &mut P,
        weights: &Path,
        image_dir: &Path,
    ) -> Result<Vec<ImageReport>, InferenceError> {
        let images = list_images(image_dir)?;
        let request = PredictRequest {
            weights: weights.to_path_buf(),
            task: TaskKind::Obb,
            images: images.clone(),
            image_size: self.image_size,
            confidence: self.confidence,
        };
        let predictions = predictor.predict(&request)?;
        if predictions.len() != images.len() {
            return Err(InferenceError::ResultCountMismatch {
                got: predictions.len(),
                expected: images.len(),
            });
        }
        Ok(images
            .into_iter()
            .zip(predictions)
            .map(|(image, prediction)| self.decode(image, prediction))
            .collect())
    }

    /// Decode one image's detections. An out-of-range class index produces a
    /// placeholder label and a stderr warning; it never aborts the batch.
    fn decode(&self, image: PathBuf, prediction: ImagePrediction) -> ImageReport {
        let detections = prediction
            .detections
            .into_iter()
            .map(|det| {
                let label = self.registry.decode(det.class_index);
                if label.is_placeholder() {
                    eprintln!(
                        "warning: class index {} outside registry ({} classes) for {}",
                        det.class_index,
                        self.registry.len(),
                        image.display()
                    );
                }
                LabeledDetection {
                    label,
                    confidence: det.confidence,
                    obb: det.obb,
                }
            })
            .collect();
        ImageReport { image, detections }
    }
}
