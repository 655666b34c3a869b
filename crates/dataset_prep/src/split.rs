//! Static train/validation group assignment.

use crate::types::{PrepError, PrepResult};

/// The ordered id universe `"1"..="count"` used by the reference dataset.
pub fn numeric_universe(count: u32) -> Vec<String> {
    (1..=count).map(|i| i.to_string()).collect()
}

/// Disjoint train/validation assignment over the group-id universe.
/// Validation membership is the externally supplied set; every other id
/// trains by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment {
    train: Vec<String>,
    val: Vec<String>,
}

impl SplitAssignment {
    /// Partition `universe` against the explicit validation set, preserving
    /// universe order on the training side and input order on the validation
    /// side. Every validation id must be part of the universe.
    pub fn assign(universe: &[String], val_ids: &[String]) -> PrepResult<Self> {
        for id in val_ids {
            if !universe.contains(id) {
                return Err(PrepError::UnknownValidationGroup { id: id.clone() });
            }
        }
        let train = universe
            .iter()
            .filter(|id| !val_ids.contains(id))
            .cloned()
            .collect();
        Ok(Self {
            train,
            val: val_ids.to_vec(),
        })
    }

    pub fn train(&self) -> &[String] {
        &self.train
    }

    pub fn val(&self) -> &[String] {
        &self.val
    }
}
