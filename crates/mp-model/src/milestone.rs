// milestone.rs — Milestone: a discrete sub-step of a goal.
//
// A milestone belongs to exactly one goal and has no independent
// lifecycle: operations on it always resolve and validate the parent
// goal first. The state machine is deliberately one-way:
//
//   Pending → Completed (terminal)
//   Pending → Cancelled (terminal)
//
// Re-completing or re-cancelling is rejected, not silently accepted, so
// callers can detect double-submission bugs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidTransition;
use crate::goal::GoalId;
use crate::seq::Seq;

/// The lifecycle state of a milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    /// Initial state; the only state transitions leave from.
    Pending,
    /// Done. Terminal.
    Completed,
    /// Abandoned. Terminal.
    Cancelled,
}

impl MilestoneStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, MilestoneStatus::Completed | MilestoneStatus::Cancelled)
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneStatus::Pending => write!(f, "pending"),
            MilestoneStatus::Completed => write!(f, "completed"),
            MilestoneStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The stored milestone record (key `milestone:{goal_id}:{index}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    /// Back-reference to the owning goal.
    pub goal_id: GoalId,
    /// Sequence number within the goal: contiguous from 0, never reused.
    pub index: u64,
    pub description: String,
    pub status: MilestoneStatus,
    /// Set exactly once, when the status transitions to `Completed`.
    pub completed_at: Option<Seq>,
}

impl Milestone {
    /// Create a pending milestone. The index comes from the parent
    /// goal's allocator; the description is validated by the tracker
    /// before anything is written.
    pub fn new(goal_id: GoalId, index: u64, description: String) -> Self {
        Self {
            goal_id,
            index,
            description,
            status: MilestoneStatus::Pending,
            completed_at: None,
        }
    }

    /// Transition to `Completed`, stamping `completed_at`.
    pub fn complete(&mut self, at: Seq) -> Result<(), InvalidTransition> {
        if self.status.is_terminal() {
            return Err(InvalidTransition {
                status: self.status,
            });
        }
        self.status = MilestoneStatus::Completed;
        self.completed_at = Some(at);
        Ok(())
    }

    /// Transition to `Cancelled`. `completed_at` stays unset.
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        if self.status.is_terminal() {
            return Err(InvalidTransition {
                status: self.status,
            });
        }
        self.status = MilestoneStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_milestone() -> Milestone {
        Milestone::new(GoalId(1), 0, "Read the book".to_string())
    }

    #[test]
    fn new_milestone_is_pending_without_completion_mark() {
        let ms = test_milestone();
        assert_eq!(ms.status, MilestoneStatus::Pending);
        assert!(ms.completed_at.is_none());
    }

    #[test]
    fn complete_stamps_completed_at() {
        let mut ms = test_milestone();
        ms.complete(Seq(9)).unwrap();
        assert_eq!(ms.status, MilestoneStatus::Completed);
        assert_eq!(ms.completed_at, Some(Seq(9)));
    }

    #[test]
    fn cancel_leaves_completed_at_unset() {
        let mut ms = test_milestone();
        ms.cancel().unwrap();
        assert_eq!(ms.status, MilestoneStatus::Cancelled);
        assert!(ms.completed_at.is_none());
    }

    #[test]
    fn double_complete_is_rejected() {
        let mut ms = test_milestone();
        ms.complete(Seq(9)).unwrap();
        let err = ms.complete(Seq(10)).unwrap_err();
        assert_eq!(err.status, MilestoneStatus::Completed);
        // The first completion mark is untouched.
        assert_eq!(ms.completed_at, Some(Seq(9)));
    }

    #[test]
    fn cancel_after_complete_is_rejected() {
        let mut ms = test_milestone();
        ms.complete(Seq(9)).unwrap();
        assert!(ms.cancel().is_err());
        assert_eq!(ms.status, MilestoneStatus::Completed);
    }

    #[test]
    fn complete_after_cancel_is_rejected() {
        let mut ms = test_milestone();
        ms.cancel().unwrap();
        assert!(ms.complete(Seq(9)).is_err());
        assert_eq!(ms.status, MilestoneStatus::Cancelled);
        assert!(ms.completed_at.is_none());
    }

    #[test]
    fn terminal_states() {
        assert!(!MilestoneStatus::Pending.is_terminal());
        assert!(MilestoneStatus::Completed.is_terminal());
        assert!(MilestoneStatus::Cancelled.is_terminal());
    }

    #[test]
    fn serialization_round_trip() {
        let mut ms = test_milestone();
        ms.complete(Seq(3)).unwrap();
        let json = serde_json::to_string(&ms).unwrap();
        assert!(json.contains("\"completed\""));
        let restored: Milestone = serde_json::from_str(&json).unwrap();
        assert_eq!(ms, restored);
    }

    #[test]
    fn status_display_format() {
        assert_eq!(MilestoneStatus::Pending.to_string(), "pending");
        assert_eq!(MilestoneStatus::Completed.to_string(), "completed");
        assert_eq!(MilestoneStatus::Cancelled.to_string(), "cancelled");
    }
}
