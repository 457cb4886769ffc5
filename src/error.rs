use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every fatal condition the indexing pipeline can raise.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("{path}: size {size} bytes exceeds block budget of {budget} bytes")]
    OversizedDocument {
        path: PathBuf,
        size: u64,
        budget: u64,
    },

    #[error("document name {name:?} contains whitespace, which the space-delimited output format cannot represent")]
    WhitespaceDocumentName { name: String },

    #[error("{path}: not valid UTF-8")]
    EncodingError { path: PathBuf },

    #[error("input directory {0:?} is not readable")]
    MissingInputDir(PathBuf),

    #[error("output path {path:?} exists and is not a directory; could not replace it: {source}")]
    OutputDirConflict {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("block size must be a positive number of units, got {0}")]
    InvalidConfig(u64),

    #[error("malformed run-file line {line:?}: {reason}")]
    MalformedRunLine { line: String, reason: String },

    #[error("internal invariant violated: {0}")]
    Internal(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
