//! Dataset preparation: grouping source files by subject identifier,
//! assigning train/validation groups, and materializing per-stage dataset
//! trees with their manifests.

pub mod grouping;
pub mod split;
pub mod staging;
pub mod types;

pub use grouping::{group_id_of, GroupMap};
pub use split::{numeric_universe, SplitAssignment};
pub use staging::{build_stage_dataset, StageLayout};
pub use types::{PrepError, PrepResult};
