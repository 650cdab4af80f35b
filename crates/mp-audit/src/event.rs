// event.rs — Audit event data model.
//
// One event per committed mutation, attributed to the principal that
// performed it. Events form a chain: each carries the hash of the
// previous log line (set by AuditLog::append), enabling tamper
// detection over the whole history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mp_model::{GoalId, Principal};

/// Which tracker mutation this event records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    GoalCreated,
    VisibilityChanged,
    GoalArchived,
    MilestoneAdded,
    MilestoneCompleted,
    MilestoneCancelled,
}

/// A single audit event — one line in the JSONL audit log.
///
/// Wall-clock timestamps live here and only here: tracker records carry
/// logical sequence marks, but an audit trail read by humans wants real
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique identifier for this event.
    pub event_id: Uuid,

    /// When this event was recorded (UTC).
    pub timestamp: DateTime<Utc>,

    /// The principal that performed the mutation.
    pub principal: Principal,

    /// Which mutation was performed.
    pub action: AuditAction,

    /// The goal the mutation targeted.
    pub goal_id: GoalId,

    /// The milestone index, for milestone-level actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_index: Option<u64>,

    /// Hash of the previous log line. None for the first event;
    /// filled in by `AuditLog::append`.
    pub previous_hash: Option<String>,

    /// Free-form extra context (e.g. the new visibility policy).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl AuditEvent {
    /// Create an event with a fresh id and the current timestamp.
    pub fn new(principal: Principal, action: AuditAction, goal_id: GoalId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            principal,
            action,
            goal_id,
            milestone_index: None,
            previous_hash: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach the milestone index and return self.
    pub fn with_milestone(mut self, index: u64) -> Self {
        self.milestone_index = Some(index);
        self
    }

    /// Attach free-form metadata and return self.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
