// keys.rs — The store key schema.
//
// The key space is the whole persistence contract: one record per key,
// each value a single JSON document that round-trips exactly. Keeping
// the formatting in one module means no other code ever assembles a key
// by hand.
//
//   goal:{id}                    → Goal record
//   milestone:{goal_id}:{index}  → Milestone record
//   next_goal_id                 → monotonic goal id counter
//   logical_clock                → monotonic Seq counter

use mp_model::GoalId;

/// Counter key for the next unassigned goal id.
pub const NEXT_GOAL_ID: &str = "next_goal_id";

/// Counter key for the logical clock backing `created_at`/`updated_at`.
pub const LOGICAL_CLOCK: &str = "logical_clock";

/// Key of a goal record.
pub fn goal(id: GoalId) -> String {
    format!("goal:{}", id)
}

/// Key of a milestone record.
pub fn milestone(goal_id: GoalId, index: u64) -> String {
    format!("milestone:{}:{}", goal_id, index)
}
