// ledger.rs — Milestone ledger operations.
//
// Milestones are sub-records of a goal: contiguous indexes from 0, a
// one-way state machine, and no lifecycle of their own. Every operation
// resolves and authorizes the parent goal first, so a milestone is never
// disclosed or mutated through a goal the caller could not reach.

use mp_audit::{AuditAction, AuditEvent};
use mp_model::{validate, GoalId, Milestone, Principal};
use mp_store::{keys, StateStore};

use crate::error::TrackerError;
use crate::tracker::Tracker;

impl<S: StateStore> Tracker<S> {
    /// Append a milestone to a goal. Requires manage permission.
    ///
    /// The new milestone takes the next contiguous index; the goal's
    /// allocator and `updated_at` move in the same operation.
    pub fn add_milestone(
        &mut self,
        caller: &Principal,
        goal_id: GoalId,
        description: impl Into<String>,
    ) -> Result<Milestone, TrackerError> {
        let mut goal = self.goal_for_manage(caller, goal_id)?;
        let description = description.into();
        validate::validate_description(&description, self.config.max_description_chars)?;

        let at = self.tick()?;
        let index = goal.allocate_milestone_index(at);
        let milestone = Milestone::new(goal_id, index, description);
        self.store_milestone(&milestone)?;
        self.store_goal(&goal)?;

        tracing::info!(goal_id = %goal_id, index, "milestone added");
        self.record_audit(
            AuditEvent::new(caller.clone(), AuditAction::MilestoneAdded, goal_id)
                .with_milestone(index),
        );
        Ok(milestone)
    }

    /// Mark a milestone completed. Requires manage permission; one-shot.
    pub fn complete_milestone(
        &mut self,
        caller: &Principal,
        goal_id: GoalId,
        index: u64,
    ) -> Result<Milestone, TrackerError> {
        self.goal_for_manage(caller, goal_id)?;
        let mut milestone = self
            .load_milestone(goal_id, index)?
            .ok_or(TrackerError::NotFound)?;

        // Reject the transition before the first write.
        if milestone.status.is_terminal() {
            return Err(TrackerError::InvalidState {
                goal_id,
                index,
                status: milestone.status,
            });
        }

        let at = self.tick()?;
        milestone.complete(at).map_err(|err| TrackerError::InvalidState {
            goal_id,
            index,
            status: err.status,
        })?;
        self.store_milestone(&milestone)?;

        tracing::info!(goal_id = %goal_id, index, "milestone completed");
        self.record_audit(
            AuditEvent::new(caller.clone(), AuditAction::MilestoneCompleted, goal_id)
                .with_milestone(index),
        );
        Ok(milestone)
    }

    /// Mark a milestone cancelled. Requires manage permission; one-shot.
    pub fn cancel_milestone(
        &mut self,
        caller: &Principal,
        goal_id: GoalId,
        index: u64,
    ) -> Result<Milestone, TrackerError> {
        self.goal_for_manage(caller, goal_id)?;
        let mut milestone = self
            .load_milestone(goal_id, index)?
            .ok_or(TrackerError::NotFound)?;

        if milestone.status.is_terminal() {
            return Err(TrackerError::InvalidState {
                goal_id,
                index,
                status: milestone.status,
            });
        }

        // No clock tick: cancellation carries no completion mark and the
        // goal record is untouched.
        milestone.cancel().map_err(|err| TrackerError::InvalidState {
            goal_id,
            index,
            status: err.status,
        })?;
        self.store_milestone(&milestone)?;

        tracing::info!(goal_id = %goal_id, index, "milestone cancelled");
        self.record_audit(
            AuditEvent::new(caller.clone(), AuditAction::MilestoneCancelled, goal_id)
                .with_milestone(index),
        );
        Ok(milestone)
    }

    /// List a goal's milestones, ordered by index ascending.
    ///
    /// Requires view permission, with the same uniform `Unauthorized` as
    /// `get_goal`. Each call re-materializes the full current list; no
    /// cursor state is retained.
    pub fn list_milestones(
        &self,
        caller: &Principal,
        goal_id: GoalId,
    ) -> Result<Vec<Milestone>, TrackerError> {
        let goal = self.goal_for_view(caller, goal_id)?;

        let mut milestones = Vec::with_capacity(goal.milestone_count() as usize);
        for index in 0..goal.milestone_count() {
            let key = keys::milestone(goal_id, index);
            let milestone = self
                .get_record::<Milestone>(&key)?
                .ok_or(TrackerError::Corrupted { key })?;
            milestones.push(milestone);
        }

        tracing::debug!(caller = %caller, goal_id = %goal_id, count = milestones.len(), "milestones listed");
        Ok(milestones)
    }
}
