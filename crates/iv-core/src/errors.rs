//! Checks that fail on the client before anything is sent.

use thiserror::Error;

use crate::enums::InterviewStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The interview status graph does not allow this move.
    #[error("interview {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: InterviewStatus,
        to: InterviewStatus,
    },

    /// A required field is missing or blank.
    #[error("{0}")]
    Validation(String),
}
