//! Interview template endpoints.

use iv_core::entities::{Interview, InterviewDraft};
use reqwest::Method;

use crate::{ApiClient, ApiError, seg};

impl ApiClient {
    /// `GET /interviews`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn list_interviews(&self) -> Result<Vec<Interview>, ApiError> {
        self.get_json("/interviews").await
    }

    /// `GET /interviews/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn get_interview(&self, id: &str) -> Result<Interview, ApiError> {
        self.get_json(&format!("/interviews/{}", seg(id))).await
    }

    /// `POST /interviews`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending if the title is
    /// missing, otherwise any request or parse failure.
    pub async fn create_interview(&self, draft: &InterviewDraft) -> Result<Interview, ApiError> {
        draft.validate_for_create()?;
        self.send_json(Method::POST, "/interviews", draft).await
    }

    /// `PUT /interviews/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the draft changes nothing,
    /// otherwise any request or parse failure.
    pub async fn update_interview(
        &self,
        id: &str,
        draft: &InterviewDraft,
    ) -> Result<Interview, ApiError> {
        if draft.is_empty() {
            return Err(ApiError::Validation("nothing to update".into()));
        }
        self.send_json(Method::PUT, &format!("/interviews/{}", seg(id)), draft)
            .await
    }

    /// `DELETE /interviews/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_interview(&self, id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::DELETE, &format!("/interviews/{}", seg(id)), None)
            .await
    }
}
