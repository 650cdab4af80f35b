// tracker.rs — The Tracker facade and its record-access plumbing.
//
// One struct owns the store handle, the limits, and the optional audit
// log. Registry operations (goals) live in registry.rs, ledger
// operations (milestones) in ledger.rs; everything here is the shared
// machinery both lean on.
//
// Transaction discipline: the surrounding execution environment
// serializes calls and treats each one as atomic, so there is no locking
// here. Our obligation is ordering — every authorization check and input
// validation happens before the first put; after writing begins, the
// only remaining failure mode is a store fault, which the environment
// rolls back.

use serde::de::DeserializeOwned;
use serde::Serialize;

use mp_access::{evaluate, Action, Decision};
use mp_audit::{AuditEvent, AuditLog};
use mp_model::{Goal, GoalId, Milestone, Principal, Seq};
use mp_store::{keys, StateStore};

use crate::config::TrackerConfig;
use crate::error::TrackerError;

/// The goal registry and milestone ledger, sharing one store handle.
///
/// Every public operation takes the calling [`mp_model::Principal`] as
/// its first argument and consults the access evaluator before any state
/// change becomes observable.
pub struct Tracker<S: StateStore> {
    pub(crate) store: S,
    pub(crate) config: TrackerConfig,
    audit: Option<AuditLog>,
}

impl<S: StateStore> Tracker<S> {
    /// Construct a tracker with default limits and no audit log.
    pub fn new(store: S) -> Result<Self, TrackerError> {
        Self::with_config(store, TrackerConfig::default())
    }

    /// Construct a tracker with explicit configuration. Opens the audit
    /// log eagerly if one is configured, so a bad path fails here rather
    /// than silently dropping history later.
    pub fn with_config(store: S, config: TrackerConfig) -> Result<Self, TrackerError> {
        let audit = match &config.audit_log {
            Some(path) => Some(AuditLog::open(path)?),
            None => None,
        };
        Ok(Self {
            store,
            config,
            audit,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Hand the store back to the host (e.g. to snapshot test state).
    pub fn into_store(self) -> S {
        self.store
    }

    // ---- record plumbing ------------------------------------------------

    /// Fetch and decode the record at `key`. A document that fails to
    /// decode is a schema invariant breach, not a NotFound.
    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, TrackerError> {
        match self.store.get(key)? {
            None => Ok(None),
            Some(doc) => match serde_json::from_str(&doc) {
                Ok(record) => Ok(Some(record)),
                Err(_) => Err(TrackerError::Corrupted {
                    key: key.to_string(),
                }),
            },
        }
    }

    /// Encode and store a record at `key`.
    pub(crate) fn put_record<T: Serialize>(
        &mut self,
        key: &str,
        record: &T,
    ) -> Result<(), TrackerError> {
        let doc = serde_json::to_string(record).map_err(mp_store::StoreError::from)?;
        self.store.put(key, doc)?;
        Ok(())
    }

    pub(crate) fn load_goal(&self, id: GoalId) -> Result<Option<Goal>, TrackerError> {
        self.get_record(&keys::goal(id))
    }

    pub(crate) fn store_goal(&mut self, goal: &Goal) -> Result<(), TrackerError> {
        self.put_record(&keys::goal(goal.id), goal)
    }

    pub(crate) fn load_milestone(
        &self,
        goal_id: GoalId,
        index: u64,
    ) -> Result<Option<Milestone>, TrackerError> {
        self.get_record(&keys::milestone(goal_id, index))
    }

    pub(crate) fn store_milestone(&mut self, milestone: &Milestone) -> Result<(), TrackerError> {
        self.put_record(&keys::milestone(milestone.goal_id, milestone.index), milestone)
    }

    // ---- counters -------------------------------------------------------

    /// Draw the next logical sequence mark. For operations that stamp a
    /// record this is the first write; all validation precedes it.
    pub(crate) fn tick(&mut self) -> Result<Seq, TrackerError> {
        let next = self.get_record::<u64>(keys::LOGICAL_CLOCK)?.unwrap_or(0) + 1;
        self.put_record(keys::LOGICAL_CLOCK, &next)?;
        Ok(Seq(next))
    }

    /// Allocate the next goal id. Ids start at 1 and are never reused,
    /// even after archival.
    pub(crate) fn allocate_goal_id(&mut self) -> Result<GoalId, TrackerError> {
        let id = self.get_record::<u64>(keys::NEXT_GOAL_ID)?.unwrap_or(1);
        self.put_record(keys::NEXT_GOAL_ID, &(id + 1))?;
        Ok(GoalId(id))
    }

    // ---- authorization chokepoints --------------------------------------

    /// Resolve a goal for a view operation.
    ///
    /// A missing goal and a denied goal return the same `Unauthorized`
    /// value, so callers cannot probe for existence.
    pub(crate) fn goal_for_view(
        &self,
        caller: &Principal,
        id: GoalId,
    ) -> Result<Goal, TrackerError> {
        let Some(goal) = self.load_goal(id)? else {
            tracing::warn!(caller = %caller, goal_id = %id, "view denied");
            return Err(TrackerError::Unauthorized);
        };
        match evaluate(caller, &goal, Action::View) {
            Decision::Allow => Ok(goal),
            Decision::Deny { reason } => {
                tracing::warn!(caller = %caller, goal_id = %id, reason = %reason, "view denied");
                Err(TrackerError::Unauthorized)
            }
        }
    }

    /// Resolve a goal for a mutating operation.
    ///
    /// Absent and archived goals are `NotFound` (archival excludes all
    /// mutation); a live goal the caller does not own is `Unauthorized`.
    pub(crate) fn goal_for_manage(
        &self,
        caller: &Principal,
        id: GoalId,
    ) -> Result<Goal, TrackerError> {
        let goal = self.load_goal(id)?.ok_or(TrackerError::NotFound)?;
        if goal.archived {
            return Err(TrackerError::NotFound);
        }
        match evaluate(caller, &goal, Action::Manage) {
            Decision::Allow => Ok(goal),
            Decision::Deny { reason } => {
                tracing::warn!(caller = %caller, goal_id = %id, reason = %reason, "manage denied");
                Err(TrackerError::Unauthorized)
            }
        }
    }

    // ---- audit ----------------------------------------------------------

    /// Record an audit event for a mutation that already committed.
    /// Audit failures are logged and swallowed: history recording must
    /// not fail the operation it records.
    pub(crate) fn record_audit(&mut self, mut event: AuditEvent) {
        if let Some(log) = &mut self.audit {
            if let Err(error) = log.append(&mut event) {
                tracing::warn!(%error, "audit append failed after commit");
            }
        }
    }
}
