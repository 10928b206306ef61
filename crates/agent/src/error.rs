use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to read policy weights from {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed policy weights: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("policy shape mismatch: {0}")]
    Shape(String),
}
