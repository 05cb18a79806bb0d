use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusteringError {
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed token {token:?} at position {position}: {reason}")]
    Parse {
        position: usize,
        token: String,
        reason: String,
    },
    #[error("input ended early: expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("point {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset has no points or zero dimension")]
    EmptyDataset,
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ClusteringError>;
