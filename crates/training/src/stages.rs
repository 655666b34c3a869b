//! Progressive stage schedules.

use thiserror::Error;

/// One progressive optimization step: train at `image_size` with
/// `batch_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    pub image_size: u32,
    pub batch_size: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no stages")]
    Empty,
    #[error("image sizes must strictly increase: stage {stage} has {size}, previous stage has {previous}")]
    NonIncreasing {
        stage: usize,
        size: u32,
        previous: u32,
    },
}

/// Ordered progressive schedule. Image sizes must strictly increase across
/// stages; batch sizes shrink with resolution under a fixed memory budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSchedule {
    stages: Vec<StageConfig>,
}

impl StageSchedule {
    pub fn new(stages: Vec<StageConfig>) -> Result<Self, ScheduleError> {
        if stages.is_empty() {
            return Err(ScheduleError::Empty);
        }
        for (idx, pair) in stages.windows(2).enumerate() {
            if pair[1].image_size <= pair[0].image_size {
                return Err(ScheduleError::NonIncreasing {
                    stage: idx + 2,
                    size: pair[1].image_size,
                    previous: pair[0].image_size,
                });
            }
        }
        Ok(Self { stages })
    }

    /// The reference four-step schedule: 640, 960, 1280, 1600.
    pub fn progressive_default() -> Self {
        Self {
            stages: vec![
                StageConfig { image_size: 640, batch_size: 10 },
                StageConfig { image_size: 960, batch_size: 4 },
                StageConfig { image_size: 1280, batch_size: 2 },
                StageConfig { image_size: 1600, batch_size: 1 },
            ],
        }
    }

    pub fn stages(&self) -> &[StageConfig] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
