//! Access-token endpoints.

use iv_core::entities::{AccessToken, TokenRequest};
use iv_core::enums::TokenStatus;
use reqwest::Method;

use crate::{ApiClient, ApiError, interview_filter, seg};

impl ApiClient {
    /// `GET /tokens`, optionally filtered by interview and derived status.
    ///
    /// Status is derived client-side at call time; the backend never filters it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn list_tokens(
        &self,
        interview_id: Option<&str>,
        status: Option<TokenStatus>,
    ) -> Result<Vec<AccessToken>, ApiError> {
        let tokens: Vec<AccessToken> = self
            .get_json(&format!("/tokens{}", interview_filter(interview_id)))
            .await?;
        Ok(match status {
            Some(wanted) => tokens.into_iter().filter(|t| t.status() == wanted).collect(),
            None => tokens,
        })
    }

    /// `POST /interviews/{id}/tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a zero count, otherwise any
    /// request or parse failure.
    pub async fn generate_tokens(
        &self,
        interview_id: &str,
        request: &TokenRequest,
    ) -> Result<Vec<AccessToken>, ApiError> {
        request.validate()?;
        self.send_json(
            Method::POST,
            &format!("/interviews/{}/tokens", seg(interview_id)),
            request,
        )
        .await
    }

    /// `DELETE /tokens/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn revoke_token(&self, id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::DELETE, &format!("/tokens/{}", seg(id)), None)
            .await
    }
}
