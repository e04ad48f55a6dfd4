//! Candidate result endpoints.

use iv_core::entities::{InterviewResult, ResultPatch};
use reqwest::Method;

use crate::{ApiClient, ApiError, interview_filter, seg};

impl ApiClient {
    /// `GET /results`, optionally filtered by interview.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn list_results(
        &self,
        interview_id: Option<&str>,
    ) -> Result<Vec<InterviewResult>, ApiError> {
        self.get_json(&format!("/results{}", interview_filter(interview_id)))
            .await
    }

    /// `GET /results/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn get_result(&self, id: &str) -> Result<InterviewResult, ApiError> {
        self.get_json(&format!("/results/{}", seg(id))).await
    }

    /// `PATCH /results/{id}` with only the fields that change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty patch, otherwise any
    /// request or parse failure.
    pub async fn patch_result(
        &self,
        id: &str,
        patch: &ResultPatch,
    ) -> Result<InterviewResult, ApiError> {
        if patch.starred.is_none() && patch.notes.is_none() {
            return Err(ApiError::Validation("nothing to update".into()));
        }
        self.send_json(Method::PATCH, &format!("/results/{}", seg(id)), patch)
            .await
    }

    /// Star or unstar a result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn set_starred(&self, id: &str, starred: bool) -> Result<InterviewResult, ApiError> {
        self.patch_result(
            id,
            &ResultPatch {
                starred: Some(starred),
                notes: None,
            },
        )
        .await
    }

    /// Replace a result's recruiter notes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn set_notes(&self, id: &str, notes: &str) -> Result<InterviewResult, ApiError> {
        self.patch_result(
            id,
            &ResultPatch {
                starred: None,
                notes: Some(notes.to_string()),
            },
        )
        .await
    }

    /// `DELETE /results/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_result(&self, id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::DELETE, &format!("/results/{}", seg(id)), None)
            .await
    }
}
