//! Question endpoints.

use iv_core::entities::{Question, QuestionDraft, QuestionOrder, reorder_payload};
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, ApiError, seg};

#[derive(Serialize)]
struct ReorderBody<'a> {
    questions: &'a [QuestionOrder],
}

impl ApiClient {
    /// `GET /interviews/{id}/questions`, in the order the backend sends them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn list_questions(&self, interview_id: &str) -> Result<Vec<Question>, ApiError> {
        self.get_json(&format!("/interviews/{}/questions", seg(interview_id)))
            .await
    }

    /// `POST /interviews/{id}/questions`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending if the draft fails its
    /// presence checks, otherwise any request or parse failure.
    pub async fn create_question(
        &self,
        interview_id: &str,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        draft.validate_for_create()?;
        self.send_json(
            Method::POST,
            &format!("/interviews/{}/questions", seg(interview_id)),
            draft,
        )
        .await
    }

    /// `PUT /questions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn update_question(
        &self,
        id: &str,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        self.send_json(Method::PUT, &format!("/questions/{}", seg(id)), draft)
            .await
    }

    /// `DELETE /questions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_question(&self, id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::DELETE, &format!("/questions/{}", seg(id)), None)
            .await
    }

    /// `PUT /interviews/{id}/questions/reorder` with the full `(id, order)` list.
    ///
    /// `ordered_ids` is the complete new sequence; position becomes order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty or duplicated list,
    /// otherwise any request failure.
    pub async fn reorder_questions<S: AsRef<str> + Sync>(
        &self,
        interview_id: &str,
        ordered_ids: &[S],
    ) -> Result<(), ApiError> {
        let payload = reorder_payload(ordered_ids)?;
        self.send_discard(
            Method::PUT,
            &format!("/interviews/{}/questions/reorder", seg(interview_id)),
            Some(&ReorderBody {
                questions: &payload,
            }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_body_shape() {
        let payload = reorder_payload(&["5", "3"]).unwrap();
        let json = serde_json::to_value(ReorderBody {
            questions: &payload,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"questions": [{"id": "5", "order": 0}, {"id": "3", "order": 1}]})
        );
    }
}
