//! Progressive multi-resolution training orchestration: stage schedules,
//! the external-trainer seam, and the weight-chaining pipeline.

pub mod pipeline;
pub mod process;
pub mod stages;
pub mod trainer;

pub use pipeline::{
    final_artifact, run_progressive, PipelineConfig, PipelineError, StageFailure, StageRun,
};
pub use process::CommandTrainer;
pub use stages::{ScheduleError, StageConfig, StageSchedule};
pub use trainer::{
    AugmentationFlags, DetectionTrainer, StageState, TrainRequest, TrainingError, WeightArtifact,
};
