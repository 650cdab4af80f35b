//! # mp-model
//!
//! Shared data model for Milepost.
//!
//! A [`Goal`] is a tracked objective owned by a [`Principal`], carrying a
//! [`Visibility`] policy and zero or more [`Milestone`] sub-records. The
//! types here are plain data: every mutation of persisted state goes
//! through the tracker crate, which re-checks authorization on each call.
//!
//! ## Key components
//!
//! - [`Principal`] — opaque authenticated caller identity
//! - [`Goal`] / [`GoalView`] — the stored record and its read-only projection
//! - [`Visibility`] — closed policy union: public, private, or shared
//! - [`Milestone`] / [`MilestoneStatus`] — the one-way milestone state machine
//! - [`validate`] — input bounds checking shared by all entry points

pub mod error;
pub mod goal;
pub mod milestone;
pub mod principal;
pub mod seq;
pub mod validate;

pub use error::{InvalidTransition, ValidationError};
pub use goal::{Goal, GoalId, GoalView, Visibility};
pub use milestone::{Milestone, MilestoneStatus};
pub use principal::Principal;
pub use seq::Seq;
