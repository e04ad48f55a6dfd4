use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{de_id, de_opt_id};

/// A candidate's completed (or in-progress) interview session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResult {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub interview_id: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InterviewResult {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// One recorded answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(deserialize_with = "de_id")]
    pub question_id: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub transcription: Option<String>,
}

/// Partial update of a result. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ResultPatch {
            starred: Some(true),
            notes: None,
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"starred":true}"#);
    }

    #[test]
    fn result_with_answers_parses() {
        let json = r#"{
            "id": "res-1",
            "candidateName": "Sam Doe",
            "interviewId": 12,
            "startedAt": "2026-02-01T09:00:00Z",
            "completedAt": "2026-02-01T09:20:00Z",
            "answers": [
                {"questionId": 1, "videoUrl": "https://cdn/1.webm", "transcription": "hello"},
                {"questionId": 2}
            ],
            "score": 7.5
        }"#;
        let result: InterviewResult = serde_json::from_str(json).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.answers.len(), 2);
        assert_eq!(result.answers[0].question_id, "1");
        assert!(result.answers[1].video_url.is_none());
        assert!(!result.starred);
    }
}
