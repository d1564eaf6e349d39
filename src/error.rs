use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    /// A caller asked for a target id the registry does not know.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("cannot read {}: {source}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine home directory")]
    HomeNotFound,
}

impl CleanError {
    /// Whether this error is a caller mistake rather than a per-target failure.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::UnknownTarget(_))
    }
}
