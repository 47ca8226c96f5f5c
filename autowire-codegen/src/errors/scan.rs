use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ScanErrorKind {
    #[error("Failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to parse {location}: {source}")]
    Parse { location: String, source: syn::Error },
    #[error("Invalid #[autowired] attribute at {location}: {source}")]
    Attribute { location: String, source: syn::Error },
    #[error("Autowired field [{field}] is declared in generic struct [{owner}] at {location}")]
    GenericOwner { field: String, owner: String, location: String },
    #[error("Owner [{owner}] of autowired fields is declared in both {first} and {second}")]
    DuplicateOwner { owner: String, first: String, second: String },
    #[error("Invalid module path `{module}`")]
    InvalidModule { module: String },
}
