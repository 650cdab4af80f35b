//! # mp-audit
//!
//! Append-only audit trail for Milepost.
//!
//! Every mutation the tracker commits (goal created, visibility changed,
//! goal archived, milestone added/completed/cancelled) is recorded as an
//! [`AuditEvent`] in a JSONL log file. Each event carries the SHA-256
//! hash of the previous line, so inserting, deleting, or editing history
//! breaks the chain and is caught by [`AuditLog::verify_chain`].
//!
//! Auditing is history, not notification delivery: nothing subscribes to
//! the log, and append failures never fail the operation that produced
//! the event.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use mp_audit::{AuditAction, AuditEvent, AuditLog};
//! use mp_model::{GoalId, Principal};
//!
//! let mut log = AuditLog::open("/tmp/milepost-audit.jsonl").unwrap();
//! let mut event = AuditEvent::new(
//!     Principal::new("alice"),
//!     AuditAction::MilestoneCompleted,
//!     GoalId(1),
//! )
//! .with_milestone(0);
//! log.append(&mut event).unwrap();
//! ```

pub mod error;
pub mod event;
pub mod hasher;
pub mod log;

pub use error::AuditError;
pub use event::{AuditAction, AuditEvent};
pub use log::AuditLog;
