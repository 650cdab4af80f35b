// error.rs — Error types for the audit subsystem.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording or verifying the audit trail.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to open or create the audit log file.
    #[error("failed to open audit log at {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading or writing the log file failed mid-stream.
    #[error("audit log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be encoded or a log line could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The hash chain does not check out — the log has been altered.
    #[error("audit chain broken at line {line}: expected previous hash {expected:?}, found {actual:?}")]
    ChainBroken {
        line: usize,
        expected: Option<String>,
        actual: Option<String>,
    },
}
