//! Bucketing source files by the subject identifier embedded in their names.

use crate::types::{PrepError, PrepResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Extensions that participate in grouping: images and their annotations.
const GROUPED_EXTENSIONS: [&str; 2] = ["png", "txt"];

/// Extract the subject identifier from a file name: strip the extension and
/// keep the digit characters of the stem in their original order, so
/// `"fw14b.png"` yields `"14"`. Returns `None` when the stem has no digits.
pub fn group_id_of(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    let id: String = stem.chars().filter(char::is_ascii_digit).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Files bucketed by subject identifier. Ids outside the known universe are
/// silently dropped: stray files in the source directory are tolerated, not
/// an error.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupMap {
    /// Scan `base_dir` and bucket every image/annotation file under its
    /// extracted identifier. Every id in `universe` gets an entry, empty or
    /// not; listing order is normalized by sorting file names.
    pub fn scan(base_dir: &Path, universe: &[String]) -> PrepResult<Self> {
        let mut groups: BTreeMap<String, Vec<String>> = universe
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        let entries = fs::read_dir(base_dir).map_err(|source| PrepError::Io {
            path: base_dir.to_path_buf(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PrepError::Io {
                path: base_dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let grouped = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| GROUPED_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if !grouped {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();

        for name in names {
            let Some(id) = group_id_of(&name) else { continue };
            if let Some(files) = groups.get_mut(&id) {
                files.push(name);
            }
        }
        Ok(Self { groups })
    }

    /// Files assigned to `id`, empty for ids without matches or outside the
    /// universe.
    pub fn files(&self, id: &str) -> &[String] {
        self.groups.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn total_files(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
