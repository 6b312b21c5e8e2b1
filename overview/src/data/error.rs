//! Snapshot error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the request snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Snapshot too large: {size} bytes (max: {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
