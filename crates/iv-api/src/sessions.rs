//! Candidate session endpoints: start with a token, upload one recording per
//! question, mark complete.

use iv_core::entities::{CandidateSession, RecordingBlob, SessionStartRequest};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::{ApiClient, ApiError, seg};

impl ApiClient {
    /// `POST /sessions/start`.
    ///
    /// The backend refuses unknown, expired and already-used tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the token is rejected or the request fails.
    pub async fn start_session(
        &self,
        token: &str,
        candidate_name: Option<&str>,
    ) -> Result<CandidateSession, ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::Validation("interview token is required".into()));
        }
        let body = SessionStartRequest {
            token: token.trim().to_string(),
            candidate_name: candidate_name.map(str::to_string),
        };
        self.send_json(Method::POST, "/sessions/start", &body).await
    }

    /// `POST /sessions/{id}/recordings` as multipart (`questionId`, `video`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty blob, otherwise any
    /// request failure.
    pub async fn upload_recording(
        &self,
        session_id: &str,
        blob: &RecordingBlob,
    ) -> Result<(), ApiError> {
        if blob.is_empty() {
            return Err(ApiError::Validation(format!(
                "recording for question {} is empty",
                blob.question_id
            )));
        }
        let part = Part::bytes(blob.data.clone())
            .file_name(blob.file_name())
            .mime_str(&blob.mime_type)?;
        let form = Form::new()
            .text("questionId", blob.question_id.clone())
            .part("video", part);
        let builder = self
            .request(
                Method::POST,
                &format!("/sessions/{}/recordings", seg(session_id)),
            )
            .timeout(self.upload_timeout)
            .multipart(form);
        self.send(builder).await.map(drop)
    }

    /// `POST /sessions/{id}/complete`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn complete_session(&self, session_id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(
            Method::POST,
            &format!("/sessions/{}/complete", seg(session_id)),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client;

    #[tokio::test]
    async fn empty_blob_is_not_sent() {
        let blob = RecordingBlob::from_chunks("q1", "video/webm", Vec::new());
        let err = client(None).upload_recording("s1", &blob).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_token_is_not_sent() {
        let err = client(None).start_session("  ", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
