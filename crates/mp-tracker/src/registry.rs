// registry.rs — Goal registry operations.
//
// Create, read, re-scope, and archive goals. Every operation is
// attributed to a caller principal; the access evaluator is consulted
// before any state change or disclosure. Failure ordering follows the
// contract: NotFound (absent/archived) before Unauthorized before
// InvalidInput on mutations, and a single Unauthorized shape on reads.

use mp_audit::{AuditAction, AuditEvent};
use mp_model::{validate, Goal, GoalId, GoalView, Principal, Visibility};
use mp_store::StateStore;

use crate::error::TrackerError;
use crate::tracker::Tracker;

impl<S: StateStore> Tracker<S> {
    /// Create a goal owned by the caller.
    ///
    /// Creation requires no pre-existing permission: any authenticated
    /// principal may create, and ownership is fixed to the creator.
    pub fn create_goal(
        &mut self,
        caller: &Principal,
        title: impl Into<String>,
        visibility: Visibility,
    ) -> Result<GoalView, TrackerError> {
        let title = title.into();
        validate::validate_title(&title, self.config.max_title_chars)?;
        validate::validate_visibility(&visibility, self.config.max_shared_principals)?;

        let at = self.tick()?;
        let id = self.allocate_goal_id()?;
        let goal = Goal::new(id, caller.clone(), title, visibility, at);
        self.store_goal(&goal)?;

        tracing::info!(goal_id = %id, owner = %caller, "goal created");
        self.record_audit(AuditEvent::new(caller.clone(), AuditAction::GoalCreated, id));
        Ok(goal.view())
    }

    /// Read a goal as the caller.
    ///
    /// Denial and nonexistence are indistinguishable here: both are
    /// `Unauthorized`, never a partial or empty result.
    pub fn get_goal(&self, caller: &Principal, goal_id: GoalId) -> Result<GoalView, TrackerError> {
        let goal = self.goal_for_view(caller, goal_id)?;
        tracing::debug!(caller = %caller, goal_id = %goal_id, "goal read");
        Ok(goal.view())
    }

    /// Replace a goal's visibility policy. Owner-only.
    ///
    /// Changing visibility is an authorized write in its own right,
    /// never a side effect of another call.
    pub fn set_visibility(
        &mut self,
        caller: &Principal,
        goal_id: GoalId,
        visibility: Visibility,
    ) -> Result<GoalView, TrackerError> {
        let mut goal = self.goal_for_manage(caller, goal_id)?;
        validate::validate_visibility(&visibility, self.config.max_shared_principals)?;

        let at = self.tick()?;
        goal.set_visibility(visibility, at);
        self.store_goal(&goal)?;

        tracing::info!(goal_id = %goal_id, visibility = %goal.visibility, "visibility changed");
        let metadata = serde_json::to_value(&goal.visibility).unwrap_or(serde_json::Value::Null);
        self.record_audit(
            AuditEvent::new(caller.clone(), AuditAction::VisibilityChanged, goal_id)
                .with_metadata(metadata),
        );
        Ok(goal.view())
    }

    /// Archive (soft-delete) a goal. Owner-only, terminal, idempotent.
    ///
    /// Re-archiving an archived goal is a no-op success, so this cannot
    /// route through the usual manage resolution, which treats archived
    /// goals as NotFound.
    pub fn archive_goal(
        &mut self,
        caller: &Principal,
        goal_id: GoalId,
    ) -> Result<GoalView, TrackerError> {
        let Some(mut goal) = self.load_goal(goal_id)? else {
            return Err(TrackerError::NotFound);
        };
        if goal.owner != *caller {
            tracing::warn!(caller = %caller, goal_id = %goal_id, "archive denied");
            return Err(TrackerError::Unauthorized);
        }
        if goal.archived {
            return Ok(goal.view());
        }

        let at = self.tick()?;
        goal.archive(at);
        self.store_goal(&goal)?;

        tracing::info!(goal_id = %goal_id, "goal archived");
        self.record_audit(AuditEvent::new(caller.clone(), AuditAction::GoalArchived, goal_id));
        Ok(goal.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_model::ValidationError;
    use mp_store::MemoryStore;

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::new()).unwrap()
    }

    fn alice() -> Principal {
        Principal::new("alice")
    }

    fn bob() -> Principal {
        Principal::new("bob")
    }

    #[test]
    fn create_goal_assigns_monotonic_ids_from_one() {
        let mut t = tracker();
        let g1 = t.create_goal(&alice(), "First", Visibility::Private).unwrap();
        let g2 = t.create_goal(&bob(), "Second", Visibility::Public).unwrap();
        assert_eq!(g1.id, GoalId(1));
        assert_eq!(g2.id, GoalId(2));
        assert_eq!(g1.owner, alice());
        assert_eq!(g2.owner, bob());
    }

    #[test]
    fn create_goal_rejects_empty_title() {
        let mut t = tracker();
        let err = t.create_goal(&alice(), "", Visibility::Private).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidInput(ValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn create_goal_rejects_oversized_title() {
        let mut t = tracker();
        let title = "x".repeat(129);
        let err = t.create_goal(&alice(), title, Visibility::Private).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidInput(ValidationError::TitleTooLong { .. })
        ));
    }

    #[test]
    fn create_goal_rejects_empty_share_set() {
        let mut t = tracker();
        let vis = Visibility::SharedWith {
            principals: Default::default(),
        };
        let err = t.create_goal(&alice(), "Goal", vis).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidInput(ValidationError::EmptyShareSet)
        ));
    }

    #[test]
    fn owner_reads_own_goal_regardless_of_visibility() {
        let mut t = tracker();
        for vis in [
            Visibility::Public,
            Visibility::Private,
            Visibility::shared_with(["carol"]),
        ] {
            let goal = t.create_goal(&alice(), "Mine", vis).unwrap();
            assert!(t.get_goal(&alice(), goal.id).is_ok());
        }
    }

    #[test]
    fn private_goal_is_unauthorized_to_strangers() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Secret", Visibility::Private).unwrap();
        let err = t.get_goal(&bob(), goal.id).unwrap_err();
        assert!(matches!(err, TrackerError::Unauthorized));
    }

    #[test]
    fn missing_goal_reads_like_a_denied_one() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Secret", Visibility::Private).unwrap();

        let denied = t.get_goal(&bob(), goal.id).unwrap_err();
        let missing = t.get_goal(&bob(), GoalId(999)).unwrap_err();

        // Same shape both ways, so existence cannot be probed.
        assert_eq!(denied.to_string(), missing.to_string());
        assert!(matches!(denied, TrackerError::Unauthorized));
        assert!(matches!(missing, TrackerError::Unauthorized));
    }

    #[test]
    fn shared_goal_visible_to_exactly_the_share_set_and_owner() {
        let mut t = tracker();
        let goal = t
            .create_goal(&alice(), "Team goal", Visibility::shared_with(["bob"]))
            .unwrap();

        assert!(t.get_goal(&alice(), goal.id).is_ok());
        assert!(t.get_goal(&bob(), goal.id).is_ok());
        assert!(matches!(
            t.get_goal(&Principal::new("carol"), goal.id),
            Err(TrackerError::Unauthorized)
        ));
    }

    #[test]
    fn public_goal_visible_to_anyone() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Open", Visibility::Public).unwrap();
        assert!(t.get_goal(&Principal::new("random"), goal.id).is_ok());
    }

    #[test]
    fn set_visibility_owner_only() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Goal", Visibility::Private).unwrap();

        let err = t
            .set_visibility(&bob(), goal.id, Visibility::Public)
            .unwrap_err();
        assert!(matches!(err, TrackerError::Unauthorized));

        let updated = t
            .set_visibility(&alice(), goal.id, Visibility::shared_with(["bob"]))
            .unwrap();
        assert_eq!(updated.visibility, Visibility::shared_with(["bob"]));
        assert!(t.get_goal(&bob(), goal.id).is_ok());
    }

    #[test]
    fn set_visibility_missing_goal_is_not_found() {
        let mut t = tracker();
        let err = t
            .set_visibility(&alice(), GoalId(42), Visibility::Public)
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound));
    }

    #[test]
    fn set_visibility_rejects_empty_share_set() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Goal", Visibility::Private).unwrap();
        let vis = Visibility::SharedWith {
            principals: Default::default(),
        };
        let err = t.set_visibility(&alice(), goal.id, vis).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
    }

    #[test]
    fn set_visibility_bumps_updated_at_only() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Goal", Visibility::Private).unwrap();
        let updated = t.set_visibility(&alice(), goal.id, Visibility::Public).unwrap();
        assert_eq!(updated.created_at, goal.created_at);
        assert!(updated.updated_at > goal.updated_at);
    }

    #[test]
    fn archive_is_idempotent_with_identical_state() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Done with this", Visibility::Private).unwrap();

        let first = t.archive_goal(&alice(), goal.id).unwrap();
        assert!(first.archived);

        let second = t.archive_goal(&alice(), goal.id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn archive_is_owner_only_even_when_already_archived() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Goal", Visibility::Public).unwrap();
        t.archive_goal(&alice(), goal.id).unwrap();

        let err = t.archive_goal(&bob(), goal.id).unwrap_err();
        assert!(matches!(err, TrackerError::Unauthorized));
    }

    #[test]
    fn archive_missing_goal_is_not_found() {
        let mut t = tracker();
        let err = t.archive_goal(&alice(), GoalId(7)).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound));
    }

    #[test]
    fn archived_goal_rejects_further_mutation_as_not_found() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "Goal", Visibility::Public).unwrap();
        t.archive_goal(&alice(), goal.id).unwrap();

        let err = t
            .set_visibility(&alice(), goal.id, Visibility::Private)
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound));
    }

    #[test]
    fn archived_goal_stays_readable_to_its_audience() {
        let mut t = tracker();
        let goal = t.create_goal(&alice(), "History", Visibility::Public).unwrap();
        t.archive_goal(&alice(), goal.id).unwrap();

        // Historical reads still succeed, for the owner and the public.
        let view = t.get_goal(&bob(), goal.id).unwrap();
        assert!(view.archived);
        assert!(t.get_goal(&alice(), goal.id).is_ok());
    }

    #[test]
    fn goal_id_not_reused_after_archival() {
        let mut t = tracker();
        let g1 = t.create_goal(&alice(), "First", Visibility::Private).unwrap();
        t.archive_goal(&alice(), g1.id).unwrap();

        let g2 = t.create_goal(&alice(), "Second", Visibility::Private).unwrap();
        assert_eq!(g2.id, GoalId(2));
    }

    #[test]
    fn non_owner_viewer_sees_the_stored_visibility() {
        let mut t = tracker();
        let goal = t
            .create_goal(&alice(), "Team goal", Visibility::shared_with(["bob"]))
            .unwrap();
        let view = t.get_goal(&bob(), goal.id).unwrap();
        assert_eq!(view.visibility, Visibility::shared_with(["bob"]));
        assert_eq!(view.milestone_count, 0);
    }
}
