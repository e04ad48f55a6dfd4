use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::TokenStatus;
use crate::errors::CoreError;
use crate::ids::{de_id, de_opt_id};

/// An interview access token handed to a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// The secret the candidate enters. Some endpoints call it `token`.
    #[serde(alias = "token")]
    pub value: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub interview_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "isUsed")]
    pub used: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Derived status at `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        TokenStatus::derive(self.expires_at, self.used, now)
    }

    /// Derived status at the current wall-clock time.
    #[must_use]
    pub fn status(&self) -> TokenStatus {
        self.status_at(Utc::now())
    }
}

/// Body for bulk token generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

impl TokenRequest {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `count` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.count == 0 {
            return Err(CoreError::Validation("token count must be at least 1".into()));
        }
        Ok(())
    }
}
