// seq.rs — Seq: logical sequence marker.
//
// Records carry logical marks, not wall-clock time: the execution
// environment serializes calls, and mutations that stamp a record draw
// the next value from a monotonic counter persisted in the store.
// Comparing two marks tells you which mutation happened first; nothing
// more.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical sequence marker drawn from the tracker's monotonic counter.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct Seq(pub u64);

impl Seq {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
