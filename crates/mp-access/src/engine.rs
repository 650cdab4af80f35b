// engine.rs — The access decision functions.
//
// Every call into the tracker passes through evaluate(), which checks:
//
// 1. Manage → caller must own the goal, and the goal must not be archived.
// 2. View   → caller owns the goal, or the goal is public, or the goal is
//             shared with the caller.
// 3. Anything else → Deny.
//
// Archival closes mutation but does not revoke view access: historical
// reads by the goal's audience still succeed after the owner archives it.

use serde::{Deserialize, Serialize};

use mp_model::{Goal, Principal, Visibility};

/// What the caller is asking to do to the goal.
///
/// Two actions cover the whole surface: reads need `View`, every
/// mutation needs `Manage`. A closed enum keeps `evaluate` exhaustive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Manage,
}

/// The result of an access evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The action is allowed — proceed.
    Allow,
    /// The action is denied. The reason is for operator logs only;
    /// callers always receive the same unauthorized error shape.
    Deny { reason: String },
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// May `caller` mutate this goal?
///
/// True iff the caller owns the goal and the goal is not archived.
/// Visibility grants viewing only — it never confers manage rights.
pub fn can_manage(caller: &Principal, goal: &Goal) -> bool {
    *caller == goal.owner && !goal.archived
}

/// May `caller` view this goal?
///
/// True iff the caller owns the goal, or the goal is public, or the goal
/// is shared with the caller. Holds for archived goals too.
pub fn can_view(caller: &Principal, goal: &Goal) -> bool {
    if *caller == goal.owner {
        return true;
    }
    match &goal.visibility {
        Visibility::Public => true,
        Visibility::Private => false,
        Visibility::SharedWith { principals } => principals.contains(caller),
    }
}

/// Evaluate a (caller, goal, action) triple.
///
/// This is the single chokepoint: the registry and the ledger never make
/// their own allow/deny judgments.
pub fn evaluate(caller: &Principal, goal: &Goal, action: Action) -> Decision {
    let allowed = match action {
        Action::View => can_view(caller, goal),
        Action::Manage => can_manage(caller, goal),
    };
    if allowed {
        Decision::Allow
    } else {
        Decision::Deny {
            reason: deny_reason(caller, goal, action),
        }
    }
}

fn deny_reason(caller: &Principal, goal: &Goal, action: Action) -> String {
    match action {
        Action::View => format!(
            "'{}' may not view goal {} ({})",
            caller, goal.id, goal.visibility
        ),
        Action::Manage if goal.archived => {
            format!("goal {} is archived and closed to mutation", goal.id)
        }
        Action::Manage => format!("'{}' does not own goal {}", caller, goal.id),
    }
}
