// goal.rs — Goal: the tracked objective and its visibility policy.
//
// A goal is created by its owner and mutated only through the tracker
// entry points, each of which re-checks authorization. Deletion is
// modeled as archival (a tombstone flag), never physical removal, so
// milestone back-references and history stay intact and ids are never
// reused.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::seq::Seq;

/// Unique, monotonically assigned goal identifier. Never reused, even
/// after archival.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who may view a goal.
///
/// A closed tagged union so the access evaluator can match exhaustively —
/// there is no open string or flag combination to default on.
/// `#[serde(tag = "kind")]` makes this serialize as `{"kind": "public"}`
/// etc., keeping stored records readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone may view.
    Public,

    /// Only the owner may view.
    Private,

    /// The owner plus the named principals may view. The owner is
    /// implicitly a viewer and need not appear in the set.
    SharedWith { principals: BTreeSet<Principal> },
}

impl Visibility {
    /// Convenience constructor for the shared variant.
    pub fn shared_with<I>(principals: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Principal>,
    {
        Visibility::SharedWith {
            principals: principals.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::SharedWith { principals } => {
                write!(f, "shared_with({})", principals.len())
            }
        }
    }
}

/// The stored goal record (key `goal:{id}`).
///
/// `next_milestone_index` is internal bookkeeping: the allocator that
/// keeps milestone indexes contiguous from 0. Reads hand out a
/// [`GoalView`] instead, which exposes it only as the derived count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub owner: Principal,
    pub title: String,
    pub visibility: Visibility,
    pub archived: bool,
    pub next_milestone_index: u64,
    pub created_at: Seq,
    pub updated_at: Seq,
}

impl Goal {
    /// Create a fresh goal record owned by `owner`.
    ///
    /// Inputs are assumed validated by the caller (the tracker validates
    /// before it allocates an id or writes anything).
    pub fn new(id: GoalId, owner: Principal, title: String, visibility: Visibility, at: Seq) -> Self {
        Self {
            id,
            owner,
            title,
            visibility,
            archived: false,
            next_milestone_index: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Derived milestone count. Indexes are contiguous and never reused,
    /// so the next free index doubles as the count.
    pub fn milestone_count(&self) -> u64 {
        self.next_milestone_index
    }

    /// Replace the visibility policy.
    pub fn set_visibility(&mut self, visibility: Visibility, at: Seq) {
        self.visibility = visibility;
        self.updated_at = at;
    }

    /// Tombstone the goal. Terminal for mutation; history stays readable.
    pub fn archive(&mut self, at: Seq) {
        self.archived = true;
        self.updated_at = at;
    }

    /// Hand out the next contiguous milestone index and advance the
    /// allocator.
    pub fn allocate_milestone_index(&mut self, at: Seq) -> u64 {
        let index = self.next_milestone_index;
        self.next_milestone_index += 1;
        self.updated_at = at;
        index
    }

    /// The read-only projection returned to authorized viewers.
    pub fn view(&self) -> GoalView {
        GoalView {
            id: self.id,
            owner: self.owner.clone(),
            title: self.title.clone(),
            visibility: self.visibility.clone(),
            archived: self.archived,
            milestone_count: self.milestone_count(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Read-only projection of a goal, as returned by read operations.
///
/// Carries the derived milestone count rather than the internal index
/// allocator; otherwise the fields the visibility policy already lets
/// the viewer see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalView {
    pub id: GoalId,
    pub owner: Principal,
    pub title: String,
    pub visibility: Visibility,
    pub archived: bool,
    pub milestone_count: u64,
    pub created_at: Seq,
    pub updated_at: Seq,
}
