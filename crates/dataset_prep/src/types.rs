use data_contracts::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("validation group {id:?} is not in the group universe")]
    UnknownValidationGroup { id: String },
    #[error("destination {path} already contains files; clear it before staging")]
    DestinationConflict { path: PathBuf },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
