// error.rs — The caller-facing error surface.
//
// Four kinds cover every caller-visible failure: InvalidInput, NotFound,
// Unauthorized, InvalidState. Unauthorized deliberately carries no
// payload — a goal the caller may not see and a goal that does not exist
// produce byte-identical errors on view operations, so existence cannot
// be probed. The remaining variants are environment faults, never
// reachable through the public API over a well-behaved store.

use thiserror::Error;

use mp_audit::AuditError;
use mp_model::{GoalId, MilestoneStatus, ValidationError};
use mp_store::StoreError;

/// Errors returned by tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A caller-supplied argument failed validation. Caller bug;
    /// recoverable by correcting the input. Nothing was written.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The referenced goal or milestone does not exist, or the goal is
    /// archived and archival excludes the requested action.
    #[error("goal or milestone not found")]
    NotFound,

    /// The caller is authenticated but not permitted. Identical for a
    /// denied goal and a nonexistent one on view operations.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested transition violates the milestone state machine.
    #[error("milestone {index} of goal {goal_id} is already {status}")]
    InvalidState {
        goal_id: GoalId,
        index: u64,
        status: MilestoneStatus,
    },

    /// The store backend failed. Rollback of the enclosing transaction
    /// is the execution environment's decision.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The audit log could not be opened at construction time.
    #[error("audit error: {0}")]
    Audit(#[from] AuditError),

    /// A record the key schema says must exist is missing or does not
    /// decode. Invariant breach in the underlying store.
    #[error("corrupted record at key '{key}'")]
    Corrupted { key: String },
}
