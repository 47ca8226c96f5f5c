use std::path::PathBuf;

use super::{ClassifyErrorKind, ScanErrorKind, WriteErrorKind};

/// Any failure of a generation round. The round produces no injectors if it happens before writing.
#[derive(thiserror::Error, Debug)]
pub enum ProcessErrorKind {
    #[error(transparent)]
    Scan(#[from] ScanErrorKind),
    #[error(transparent)]
    Classify(#[from] ClassifyErrorKind),
    #[error("Failed to render injector: {0}")]
    Emit(#[from] syn::Error),
    #[error("Injectors of [{first}] and [{second}] would both be written to {path}")]
    UnitCollision { path: PathBuf, first: String, second: String },
    #[error(transparent)]
    Write(#[from] WriteErrorKind),
    #[error("Output directory isn't set and `OUT_DIR` is absent")]
    NoOutDir,
}
