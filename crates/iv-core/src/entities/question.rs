use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{de_id, de_opt_id};

/// A question within an interview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub text: String,
    /// Seconds the candidate gets to think before recording starts.
    pub preparation_time: u32,
    /// Seconds of recording before auto-stop.
    pub recording_time: u32,
    #[serde(default)]
    pub order: u32,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub interview_id: Option<String>,
    /// Practice questions may be re-recorded and are never uploaded.
    #[serde(default)]
    pub is_practice: bool,
}

impl Question {
    /// The warm-up question shown before the real ones.
    #[must_use]
    pub fn practice(preparation_time: u32, recording_time: u32) -> Self {
        Self {
            id: "practice".into(),
            text: "Practice question: introduce yourself. This answer is not submitted.".into(),
            preparation_time,
            recording_time,
            order: 0,
            interview_id: None,
            is_practice: true,
        }
    }
}

/// Body for question create and update calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl QuestionDraft {
    /// Presence check for creation: text and a positive recording time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the text is blank or the
    /// recording time is zero.
    pub fn validate_for_create(&self) -> Result<(), CoreError> {
        if self.text.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(CoreError::Validation("question text is required".into()));
        }
        if self.recording_time == Some(0) {
            return Err(CoreError::Validation(
                "recording time must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// One `(id, order)` pair of a reorder request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionOrder {
    pub id: String,
    pub order: u32,
}

/// Build the full reorder payload: position in `ids` becomes the order.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `ids` is empty or repeats an id.
pub fn reorder_payload<S: AsRef<str>>(ids: &[S]) -> Result<Vec<QuestionOrder>, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("reorder needs at least one question id".into()));
    }
    let mut out: Vec<QuestionOrder> = Vec::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        let id = id.as_ref();
        if out.iter().any(|o| o.id == id) {
            return Err(CoreError::Validation(format!("question '{id}' listed twice")));
        }
        out.push(QuestionOrder {
            id: id.to_string(),
            order: u32::try_from(index).unwrap_or(u32::MAX),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_keeps_array_position_over_order_field() {
        let questions: Vec<Question> = serde_json::from_str(
            r#"[
                {"id": "first", "text": "A", "preparationTime": 5, "recordingTime": 5, "order": 3},
                {"id": "second", "text": "B", "preparationTime": 5, "recordingTime": 5, "order": 1}
            ]"#,
        )
        .unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn reorder_uses_position_as_order() {
        let payload = reorder_payload(&["c", "a", "b"]).unwrap();
        assert_eq!(
            payload,
            vec![
                QuestionOrder { id: "c".into(), order: 0 },
                QuestionOrder { id: "a".into(), order: 1 },
                QuestionOrder { id: "b".into(), order: 2 },
            ]
        );
    }

    #[test]
    fn reorder_rejects_empty_and_duplicates() {
        assert!(reorder_payload::<&str>(&[]).is_err());
        let err = reorder_payload(&["a", "b", "a"]).unwrap_err();
        assert!(err.to_string().contains("'a' listed twice"));
    }

    #[test]
    fn practice_question_defaults() {
        let p = Question::practice(10, 10);
        assert!(p.is_practice);
        assert_eq!(p.preparation_time, 10);
        assert_eq!(p.recording_time, 10);
    }

    #[test]
    fn draft_presence_checks() {
        let blank = QuestionDraft {
            text: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.validate_for_create().is_err());

        let zero = QuestionDraft {
            text: Some("Why us?".into()),
            recording_time: Some(0),
            ..Default::default()
        };
        assert!(zero.validate_for_create().is_err());

        let ok = QuestionDraft {
            text: Some("Why us?".into()),
            preparation_time: Some(30),
            recording_time: Some(90),
            order: None,
        };
        assert!(ok.validate_for_create().is_ok());
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["preparationTime"], 30);
        assert!(json.get("order").is_none());
    }
}
