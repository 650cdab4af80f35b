// error.rs — Error types for the data model.

use thiserror::Error;

use crate::milestone::MilestoneStatus;

/// A caller-supplied argument failed validation.
///
/// These are always caller bugs, recoverable by correcting the input;
/// nothing has been written when one is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A goal title must be non-empty.
    #[error("goal title is empty")]
    EmptyTitle,

    /// A goal title exceeded the configured bound.
    #[error("goal title is {actual} characters, maximum is {max}")]
    TitleTooLong { max: usize, actual: usize },

    /// A milestone description must be non-empty.
    #[error("milestone description is empty")]
    EmptyDescription,

    /// A milestone description exceeded the configured bound.
    #[error("milestone description is {actual} characters, maximum is {max}")]
    DescriptionTooLong { max: usize, actual: usize },

    /// A shared visibility must name at least one principal.
    #[error("shared visibility names no principals")]
    EmptyShareSet,

    /// A share set exceeded the configured bound.
    #[error("share set names {actual} principals, maximum is {max}")]
    ShareSetTooLarge { max: usize, actual: usize },
}

/// Attempted a transition out of a terminal milestone status.
///
/// The milestone state machine is one-way: once a milestone is completed
/// or cancelled it never changes again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("milestone is already {status}")]
pub struct InvalidTransition {
    pub status: MilestoneStatus,
}
