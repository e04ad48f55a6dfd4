use serde::{Deserialize, Serialize};

use super::{Interview, Question};
use crate::ids::de_id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartRequest {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
}

/// Reply to a candidate session start: the session id plus what to ask.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSession {
    #[serde(deserialize_with = "de_id", alias = "id")]
    pub session_id: String,
    pub interview: Interview,
    /// Presented in array order; `order` is informational only.
    #[serde(default)]
    pub questions: Vec<Question>,
}
