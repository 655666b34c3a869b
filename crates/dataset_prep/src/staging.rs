//! Materializing per-stage dataset trees and their manifests.

use crate::grouping::GroupMap;
use crate::split::SplitAssignment;
use crate::types::{PrepError, PrepResult};
use data_contracts::{ClassRegistry, StageManifest};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout for one progressive stage, 1-based.
#[derive(Debug, Clone)]
pub struct StageLayout {
    pub number: usize,
    pub root: PathBuf,
    pub train_dir: PathBuf,
    pub val_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl StageLayout {
    pub fn for_stage(output_root: &Path, number: usize) -> Self {
        let root = output_root.join(format!("step_{number}"));
        Self {
            number,
            train_dir: root.join("train"),
            val_dir: root.join("val"),
            manifest_path: root.join("data.yaml"),
            root,
        }
    }

    /// Run name passed to the trainer; the run directory lands under `root`.
    pub fn run_name(&self) -> String {
        format!("training_step_{}", self.number)
    }

    /// Well-known weight artifact path produced by this stage's training run.
    pub fn weights_path(&self) -> PathBuf {
        self.root
            .join(self.run_name())
            .join("weights")
            .join("last.pt")
    }
}

/// Create the stage's train/val directories, copy every grouped file into its
/// assigned side (flat, later copies overwrite earlier ones), and write the
/// stage manifest with absolute directory paths. Destination directories must
/// be absent or empty; a rerun against an occupied destination fails.
pub fn build_stage_dataset(
    source_dir: &Path,
    layout: &StageLayout,
    split: &SplitAssignment,
    groups: &GroupMap,
    registry: &ClassRegistry,
) -> PrepResult<StageManifest> {
    ensure_fresh_dir(&layout.train_dir)?;
    ensure_fresh_dir(&layout.val_dir)?;

    copy_group_files(source_dir, split.train(), groups, &layout.train_dir)?;
    copy_group_files(source_dir, split.val(), groups, &layout.val_dir)?;

    let manifest = StageManifest::new(
        absolute(&layout.train_dir)?,
        absolute(&layout.val_dir)?,
        registry.names().to_vec(),
    );
    manifest.write_to(&layout.manifest_path)?;
    Ok(manifest)
}

fn ensure_fresh_dir(dir: &Path) -> PrepResult<()> {
    if dir.exists() {
        let mut entries = fs::read_dir(dir).map_err(|source| PrepError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if entries.next().is_some() {
            return Err(PrepError::DestinationConflict {
                path: dir.to_path_buf(),
            });
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| PrepError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn copy_group_files(
    source_dir: &Path,
    ids: &[String],
    groups: &GroupMap,
    dest_dir: &Path,
) -> PrepResult<()> {
    for id in ids {
        for file in groups.files(id) {
            let from = source_dir.join(file);
            let to = dest_dir.join(file);
            fs::copy(&from, &to).map_err(|source| PrepError::Io {
                path: from.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

fn absolute(path: &Path) -> PrepResult<PathBuf> {
    fs::canonicalize(path).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })
}
