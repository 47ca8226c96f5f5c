use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum WriteErrorKind {
    #[error("Failed to write {unit} to {path}: {source}")]
    Io { unit: String, path: PathBuf, source: io::Error },
}
