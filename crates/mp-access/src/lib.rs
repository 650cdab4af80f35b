//! # mp-access
//!
//! Access control evaluation for Milepost.
//!
//! Implements the "no ambient trust" boundary: every registry and ledger
//! entry point asks [`evaluate`] whether the calling principal may
//! perform the requested [`Action`] on the target goal before any state
//! change becomes observable.
//!
//! ## Key invariants
//!
//! - **Pure**: decisions depend only on (caller, goal snapshot, action);
//!   no clock, no store, no hidden state.
//! - **Total**: every input maps to exactly one of Allow / Deny. There
//!   is no "unknown" outcome and no default-allow arm for the rest of
//!   the core to trip over.
//! - **Default deny**: anything not explicitly granted by the goal's
//!   owner or visibility policy is denied.

pub mod engine;

pub use engine::{can_manage, can_view, evaluate, Action, Decision};
