// error.rs — Error types for the store backends.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a store backend.
///
/// These are environment faults, not caller bugs: the tracker propagates
/// them unchanged and the surrounding execution environment decides how
/// to roll back the failed transaction.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file's contents could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
