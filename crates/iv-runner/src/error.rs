use iv_api::ApiError;
use iv_auth::AuthError;
use iv_core::routes::Redirect;
use thiserror::Error;

use crate::capture::CaptureError;
use crate::runner::Phase;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// Camera or microphone could not be acquired; the interview never starts.
    #[error("camera/microphone unavailable: {0}")]
    MediaUnavailable(#[source] CaptureError),

    /// The backend refused the interview token. The stored token is cleared.
    #[error("could not start interview session: {0}")]
    SessionStart(#[source] ApiError),

    #[error("cannot {action} while {phase}")]
    InvalidAction { action: &'static str, phase: Phase },

    #[error("interview has no questions")]
    NoQuestions,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("upload queue stopped")]
    UploadQueueClosed,
}

impl RunnerError {
    /// Where the candidate must go to recover, for failures that end the run
    /// before it starts.
    #[must_use]
    pub const fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::MediaUnavailable(_) => Some(Redirect::Instructions),
            Self::SessionStart(_) => Some(Redirect::TokenEntry),
            Self::Api(ApiError::Unauthorized { redirect }) => Some(*redirect),
            _ => None,
        }
    }
}
