use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pyrovision.toml";

/// Resolved tool configuration. Defaults reproduce the reference run; an
/// optional TOML file overrides individual fields. Every component receives
/// its values explicitly from here; nothing reads process-wide state.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Flat directory of grouped training images and annotation files.
    pub source_dir: PathBuf,
    /// Output root for per-stage datasets, manifests, and runs.
    pub output_dir: PathBuf,
    /// Directory of images to run prediction over.
    pub test_dir: PathBuf,
    /// Pretrained weights consumed by the first stage.
    pub base_weights: PathBuf,
    /// Weights used by the predict tool.
    pub final_weights: PathBuf,
    pub trainer_bin: PathBuf,
    pub predictor_bin: PathBuf,
    pub epochs: u32,
    pub patience: u32,
    pub workers: u32,
    pub device: String,
    /// Size of the group-id universe; ids are "1"..="group_count".
    pub group_count: u32,
    /// Fixed validation groups, chosen for subject diversity.
    pub val_groups: Vec<String>,
    pub inference_image_size: u32,
    pub confidence: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("assets/training_images"),
            output_dir: PathBuf::from("assets/progressive_results"),
            test_dir: PathBuf::from("assets/test_images"),
            base_weights: PathBuf::from("yolo11x-obb.pt"),
            final_weights: PathBuf::from("best.pt"),
            trainer_bin: PathBuf::from("yolo"),
            predictor_bin: PathBuf::from("obb_predict"),
            epochs: 1000,
            patience: 100,
            workers: 12,
            device: "0".to_string(),
            group_count: 34,
            val_groups: ["1", "7", "14", "29"].map(String::from).to_vec(),
            inference_image_size: 1600,
            confidence: 0.6,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ToolConfigFile {
    source_dir: Option<String>,
    output_dir: Option<String>,
    test_dir: Option<String>,
    base_weights: Option<String>,
    final_weights: Option<String>,
    trainer_bin: Option<String>,
    predictor_bin: Option<String>,
    epochs: Option<u32>,
    patience: Option<u32>,
    workers: Option<u32>,
    device: Option<String>,
    group_count: Option<u32>,
    val_groups: Option<Vec<String>>,
    inference_image_size: Option<u32>,
    confidence: Option<f32>,
}

impl ToolConfig {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        let cfg = Self::from_path(path).unwrap_or_default();
        cfg.warn_if_invalid();
        cfg
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let raw = std::fs::read_to_string(path).ok()?;
        let file: ToolConfigFile = toml::from_str(&raw).ok()?;
        Some(Self::from_file(file))
    }

    fn from_file(file: ToolConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            source_dir: file.source_dir.map(PathBuf::from).unwrap_or(defaults.source_dir),
            output_dir: file.output_dir.map(PathBuf::from).unwrap_or(defaults.output_dir),
            test_dir: file.test_dir.map(PathBuf::from).unwrap_or(defaults.test_dir),
            base_weights: file
                .base_weights
                .map(PathBuf::from)
                .unwrap_or(defaults.base_weights),
            final_weights: file
                .final_weights
                .map(PathBuf::from)
                .unwrap_or(defaults.final_weights),
            trainer_bin: file
                .trainer_bin
                .map(PathBuf::from)
                .unwrap_or(defaults.trainer_bin),
            predictor_bin: file
                .predictor_bin
                .map(PathBuf::from)
                .unwrap_or(defaults.predictor_bin),
            epochs: file.epochs.unwrap_or(defaults.epochs),
            patience: file.patience.unwrap_or(defaults.patience),
            workers: file.workers.unwrap_or(defaults.workers),
            device: file.device.unwrap_or(defaults.device),
            group_count: file.group_count.unwrap_or(defaults.group_count),
            val_groups: file.val_groups.unwrap_or(defaults.val_groups),
            inference_image_size: file
                .inference_image_size
                .unwrap_or(defaults.inference_image_size),
            confidence: file.confidence.unwrap_or(defaults.confidence),
        }
    }

    fn warn_if_invalid(&self) {
        if self.group_count == 0 {
            eprintln!("tools config: group_count is zero; no files will be grouped");
        }
        if self.val_groups.is_empty() {
            eprintln!("tools config: val_groups is empty; every group will train");
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            eprintln!(
                "tools config: confidence {} is outside [0, 1]",
                self.confidence
            );
        }
    }
}
