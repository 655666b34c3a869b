//! Batched oriented-bounding-box inference over an image directory and
//! per-image report decoding.

pub mod process;
pub mod report;
pub mod runner;

pub use process::CommandPredictor;
pub use report::{Detection, ImagePrediction, ImageReport, LabeledDetection, OrientedBox};
pub use runner::{
    list_images, DetectionPredictor, InferenceError, InferenceRunner, PredictRequest,
};
