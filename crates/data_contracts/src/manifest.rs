use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml parse error at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("class count {nc} does not match {names} class names at {path}")]
    ClassCountMismatch {
        path: PathBuf,
        nc: usize,
        names: usize,
    },
}

/// Per-stage dataset declaration read once by the external trainer.
/// Written when the stage dataset is materialized, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageManifest {
    pub train: PathBuf,
    pub val: PathBuf,
    pub names: Vec<String>,
}

#[derive(Deserialize)]
struct RawManifest {
    train: String,
    val: String,
    nc: usize,
    names: Vec<String>,
}

impl StageManifest {
    pub fn new(train: PathBuf, val: PathBuf, names: Vec<String>) -> Self {
        Self { train, val, names }
    }

    pub fn class_count(&self) -> usize {
        self.names.len()
    }

    /// Render the `data.yaml` body: train/val directory paths, class count,
    /// and the flow-style single-quoted class-name list.
    pub fn to_yaml(&self) -> String {
        let names = self
            .names
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "train: {}\nval: {}\nnc: {}\nnames: [{}]\n",
            self.train.display(),
            self.val.display(),
            self.names.len(),
            names
        )
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_yaml()).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawManifest =
            serde_yaml::from_str(&raw).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if raw.nc != raw.names.len() {
            return Err(ManifestError::ClassCountMismatch {
                path: path.to_path_buf(),
                nc: raw.nc,
                names: raw.names.len(),
            });
        }
        Ok(StageManifest {
            train: raw.train.into(),
            val: raw.val.into(),
            names: raw.names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_count_and_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.yaml");
        let manifest = StageManifest::new(
            PathBuf::from("/data/step_1/train"),
            PathBuf::from("/data/step_1/val"),
            vec!["Snap".to_string(), "Phantom".to_string()],
        );
        manifest.write_to(&path).expect("write manifest");

        let parsed = StageManifest::from_path(&path).expect("parse manifest");
        assert_eq!(parsed.class_count(), 2);
        assert_eq!(parsed.names, manifest.names);
        assert_eq!(parsed.train, manifest.train);
        assert_eq!(parsed.val, manifest.val);
    }

    #[test]
    fn rejects_mismatched_class_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.yaml");
        fs::write(&path, "train: /t\nval: /v\nnc: 3\nnames: ['a', 'b']\n").expect("write");
        let err = StageManifest::from_path(&path).expect_err("mismatch must fail");
        assert!(matches!(
            err,
            ManifestError::ClassCountMismatch { nc: 3, names: 2, .. }
        ));
    }

    #[test]
    fn yaml_body_matches_expected_layout() {
        let manifest = StageManifest::new(
            PathBuf::from("/abs/train"),
            PathBuf::from("/abs/val"),
            vec!["AllBlue".to_string()],
        );
        assert_eq!(
            manifest.to_yaml(),
            "train: /abs/train\nval: /abs/val\nnc: 1\nnames: ['AllBlue']\n"
        );
    }
}
