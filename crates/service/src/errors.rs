use std::path::PathBuf;

use thiserror::Error;

/// Persistence-layer failures. Never folded into "no session".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt store file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("encode error: {0}")]
    Encode(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
