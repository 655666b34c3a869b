//! Detection result and report types.

use data_contracts::ClassLabel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Oriented box as center, size, and rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

/// Raw detection as returned by the external predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_index: usize,
    pub confidence: f32,
    pub obb: OrientedBox,
}

/// Detections for one input image; empty when the predictor saw nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePrediction {
    pub detections: Vec<Detection>,
}

/// A detection with its class index decoded against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDetection {
    pub label: ClassLabel,
    pub confidence: f32,
    pub obb: OrientedBox,
}

/// Per-image report, produced in input order. Images with zero detections
/// are reported explicitly rather than omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    pub image: PathBuf,
    pub detections: Vec<LabeledDetection>,
}

impl ImageReport {
    pub fn has_detections(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Render the report block for one image: a header line, then one line
    /// per detection or an explicit no-detections line.
    pub fn render(&self) -> String {
        let name = self
            .image
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("<unnamed>");
        let mut out = format!("--- Results for image {name} ---\n");
        if self.detections.is_empty() {
            out.push_str("  No OBB detections for this image.\n");
        } else {
            for det in &self.detections {
                out.push_str(&format!(
                    "  Class: {}, Confidence: {:.2}\n",
                    det.label.display_name(),
                    det.confidence
                ));
            }
        }
        out
    }
}
