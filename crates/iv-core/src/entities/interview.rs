use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::InterviewStatus;
use crate::errors::CoreError;
use crate::ids::de_id;

/// An interview template owned by a recruiter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: InterviewStatus,
    /// Expected length in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub token_count: u32,
    #[serde(default)]
    pub response_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Interview {
    /// Allow a status update if it keeps the status or follows the graph.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` for any other move.
    pub fn check_transition(&self, next: InterviewStatus) -> Result<(), CoreError> {
        if self.status == next || self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            })
        }
    }
}

/// Body for interview create and update calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InterviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl InterviewDraft {
    /// Presence check for creation: a title is required.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the title is missing or blank.
    pub fn validate_for_create(&self) -> Result<(), CoreError> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(CoreError::Validation("interview title is required".into())),
        }
    }

    /// Whether the draft would change anything on update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.duration.is_none()
    }
}
