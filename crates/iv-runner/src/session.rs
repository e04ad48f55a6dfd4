//! Token → session exchange and the backend calls a run needs.

use async_trait::async_trait;
use iv_api::{ApiClient, ApiError};
use iv_auth::SessionStore;
use iv_config::RunnerConfig;
use iv_core::entities::{CandidateSession, Interview, Question, RecordingBlob};

use crate::error::RunnerError;

/// Candidate-facing backend operations.
#[async_trait]
pub trait CandidateBackend: Send + Sync {
    async fn start_session(
        &self,
        token: &str,
        candidate_name: Option<&str>,
    ) -> Result<CandidateSession, ApiError>;

    async fn upload_recording(&self, session_id: &str, blob: &RecordingBlob)
    -> Result<(), ApiError>;

    async fn complete_session(&self, session_id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl CandidateBackend for ApiClient {
    async fn start_session(
        &self,
        token: &str,
        candidate_name: Option<&str>,
    ) -> Result<CandidateSession, ApiError> {
        Self::start_session(self, token, candidate_name).await
    }

    async fn upload_recording(
        &self,
        session_id: &str,
        blob: &RecordingBlob,
    ) -> Result<(), ApiError> {
        Self::upload_recording(self, session_id, blob).await
    }

    async fn complete_session(&self, session_id: &str) -> Result<(), ApiError> {
        Self::complete_session(self, session_id).await
    }
}

/// A started session with its questions in presentation order.
#[derive(Debug, Clone)]
pub struct PreparedSession {
    pub session_id: String,
    pub interview: Interview,
    pub questions: Vec<Question>,
}

impl PreparedSession {
    /// Number of questions that will be uploaded.
    #[must_use]
    pub fn answered_question_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_practice).count()
    }
}

/// Exchange an interview token for a session.
///
/// The token is stored as pending first and promoted once the backend
/// accepts it. Any start failure clears the interview slots.
///
/// # Errors
///
/// Returns [`RunnerError::SessionStart`] when the backend refuses the token
/// (redirect: token entry), [`RunnerError::NoQuestions`] for an empty
/// interview, or [`RunnerError::Auth`] if the session file cannot be written.
pub async fn open_session(
    backend: &dyn CandidateBackend,
    store: &SessionStore,
    token: &str,
    candidate_name: Option<&str>,
    config: &RunnerConfig,
) -> Result<PreparedSession, RunnerError> {
    store.begin_interview(token.trim())?;

    let mut session = match backend.start_session(token, candidate_name).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("session start refused: {e}");
            store.clear_interview()?;
            return Err(RunnerError::SessionStart(e));
        }
    };

    let mut questions = std::mem::take(&mut session.questions);
    if questions.is_empty() {
        store.clear_interview()?;
        return Err(RunnerError::NoQuestions);
    }
    if config.practice_question {
        questions.insert(
            0,
            Question::practice(
                config.practice_preparation_secs,
                config.practice_recording_secs,
            ),
        );
    }

    store.accept_interview(&session.interview.id)?;
    tracing::info!(
        session = %session.session_id,
        interview = %session.interview.id,
        questions = questions.len(),
        "interview session started"
    );

    Ok(PreparedSession {
        session_id: session.session_id,
        interview: session.interview,
        questions,
    })
}
