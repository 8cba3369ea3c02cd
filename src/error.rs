//! Error types.
//!
//! Constraint rejections are not errors; they are recorded as
//! [`ConstraintViolation`](crate::constraints::ConstraintViolation)s.
//! Only invalid input, invalid configuration, and structurally incomplete
//! schedules surface here.

use thiserror::Error;

use crate::validation::IncompleteSchedule;

/// Failures of a scheduling run.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("round-robin scheduling requires at least 2 participants, got {count}")]
    TooFewParticipants { count: usize },

    #[error("leg count must be at least 1, got {legs}")]
    InvalidLegs { legs: u32 },

    #[error("duplicate participant id: {id}")]
    DuplicateParticipant { id: String },

    #[error(
        "incomplete schedule: expected {} events, generated {} ({} missing)",
        .0.expected,
        .0.actual,
        .0.missing()
    )]
    Incomplete(Box<IncompleteSchedule>),

    #[error("violation ratio is undefined for {participant_count} participant(s)")]
    DegenerateRatio { participant_count: usize },
}

impl ScheduleError {
    /// The incompleteness payload, if this is an incomplete-schedule failure.
    pub fn as_incomplete(&self) -> Option<&IncompleteSchedule> {
        match self {
            Self::Incomplete(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Invalid constraint configuration, raised at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("invalid parameter for constraint '{constraint}': {reason}")]
    InvalidParameter { constraint: String, reason: String },
}

impl ConstraintError {
    pub(crate) fn invalid(constraint: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            constraint: constraint.to_string(),
            reason: reason.into(),
        }
    }
}
