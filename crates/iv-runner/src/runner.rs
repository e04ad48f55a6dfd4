//! Per-question interview state machine.
//!
//! ```text
//! Preparing ──(countdown 0 | start early)──▶ Recording
//! Recording ──(countdown 0 | stop)─────────▶ Reviewing
//! Reviewing ──(re-record, practice only)───▶ Preparing (same question)
//! Reviewing ──(continue)───────────────────▶ Preparing (next) | Complete
//! ```
//!
//! Only one countdown exists at a time; entering a phase replaces it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use iv_config::{RunnerConfig, UploadConfig};
use iv_core::entities::{Question, RecordingBlob};

use crate::capture::MediaCapture;
use crate::clock::Clock;
use crate::countdown::Countdown;
use crate::error::RunnerError;
use crate::session::{CandidateBackend, PreparedSession};
use crate::upload::{UploadEntry, UploadQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preparing,
    Recording,
    Reviewing,
    Complete,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::Recording => "recording",
            Self::Reviewing => "reviewing",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expiry {
    PreparationOver,
    RecordingOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerEvent {
    QuestionStarted {
        index: usize,
        question_id: String,
        practice: bool,
    },
    /// Raised once per preparation, when the last seconds begin.
    PreparationWarning { remaining_secs: u64 },
    RecordingStarted { question_id: String, early: bool },
    RecordingStopped {
        question_id: String,
        bytes: usize,
        auto: bool,
    },
    Rerecording { question_id: String },
    UploadQueued { question_id: String },
    Completed,
    Aborted,
    /// A candidate action that does not apply to the current phase.
    ActionRejected { reason: String },
}

/// Timing knobs taken from `[runner]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerTiming {
    pub warning_threshold: Duration,
    pub flush_grace: Duration,
}

impl From<&RunnerConfig> for RunnerTiming {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            warning_threshold: Duration::from_secs(u64::from(config.warning_threshold_secs)),
            flush_grace: Duration::from_millis(config.flush_grace_ms),
        }
    }
}

impl Default for RunnerTiming {
    fn default() -> Self {
        Self::from(&RunnerConfig::default())
    }
}

/// What a display needs to render the current moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSnapshot {
    pub phase: Phase,
    /// Zero-based position in the question list.
    pub index: usize,
    pub total: usize,
    /// One-based number among the answered questions; `None` for practice.
    pub question_number: Option<usize>,
    /// Questions that will be uploaded (practice excluded).
    pub question_count: usize,
    pub question_id: String,
    pub question_text: String,
    pub is_practice: bool,
    pub remaining_secs: Option<u64>,
    pub warning: bool,
    pub can_rerecord: bool,
    pub recorded_bytes: Option<usize>,
}

/// Outcome of a run, available once it has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub session_id: String,
    pub uploads: Vec<UploadEntry>,
    /// `Some(Ok)` once the backend accepted completion; `None` if never asked.
    pub completion: Option<Result<(), String>>,
    pub aborted: bool,
}

impl RunReport {
    #[must_use]
    pub fn failed_uploads(&self) -> usize {
        self.uploads
            .iter()
            .filter(|e| matches!(e.status, crate::upload::UploadStatus::Failed { .. }))
            .count()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.completion, Some(Ok(()))) && !self.aborted
    }
}

pub struct InterviewRunner {
    session: PreparedSession,
    index: usize,
    phase: Phase,
    countdown: Option<Countdown<Expiry>>,
    warning: bool,
    timing: RunnerTiming,
    capture: Box<dyn MediaCapture>,
    released: bool,
    clock: Arc<dyn Clock>,
    backend: Arc<dyn CandidateBackend>,
    uploads: Option<UploadQueue>,
    finished_uploads: Vec<UploadEntry>,
    blob: Option<RecordingBlob>,
    completion: Option<Result<(), String>>,
    aborted: bool,
    events: Vec<RunnerEvent>,
}

impl InterviewRunner {
    /// Acquire media and enter the first question.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MediaUnavailable`] (redirect: instructions) if
    /// the capture cannot be acquired, or [`RunnerError::NoQuestions`].
    pub async fn start(
        session: PreparedSession,
        mut capture: Box<dyn MediaCapture>,
        backend: Arc<dyn CandidateBackend>,
        clock: Arc<dyn Clock>,
        timing: RunnerTiming,
        upload: &UploadConfig,
    ) -> Result<Self, RunnerError> {
        if session.questions.is_empty() {
            return Err(RunnerError::NoQuestions);
        }
        capture
            .acquire()
            .await
            .map_err(RunnerError::MediaUnavailable)?;

        let uploads = UploadQueue::spawn(Arc::clone(&backend), upload);
        let mut runner = Self {
            session,
            index: 0,
            phase: Phase::Preparing,
            countdown: None,
            warning: false,
            timing,
            capture,
            released: false,
            clock,
            backend,
            uploads: Some(uploads),
            finished_uploads: Vec::new(),
            blob: None,
            completion: None,
            aborted: false,
            events: Vec::new(),
        };
        runner.enter_question(0);
        Ok(runner)
    }

    // --- accessors ---

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.session.questions[self.index]
    }

    /// The recording under review, if any.
    #[must_use]
    pub const fn recording(&self) -> Option<&RecordingBlob> {
        self.blob.as_ref()
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }

    #[must_use]
    pub fn upload_statuses(&self) -> Vec<UploadEntry> {
        self.uploads
            .as_ref()
            .map_or_else(|| self.finished_uploads.clone(), UploadQueue::statuses)
    }

    /// Events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<RunnerEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> RunnerSnapshot {
        let now = self.clock.now();
        let question = self.current_question();
        RunnerSnapshot {
            phase: self.phase,
            index: self.index,
            total: self.session.questions.len(),
            question_number: (!question.is_practice).then(|| {
                self.session.questions[..=self.index]
                    .iter()
                    .filter(|q| !q.is_practice)
                    .count()
            }),
            question_count: self.session.answered_question_count(),
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            is_practice: question.is_practice,
            remaining_secs: self.countdown.as_ref().map(|c| c.remaining_secs(now)),
            warning: self.warning,
            can_rerecord: self.phase == Phase::Reviewing && question.is_practice,
            recorded_bytes: self.blob.as_ref().map(RecordingBlob::len),
        }
    }

    // --- transitions ---

    /// Poll the active countdown and fire whatever it yields.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Capture`] if an automatic start or stop fails.
    pub async fn tick(&mut self) -> Result<(), RunnerError> {
        let now = self.clock.now();
        let Some(countdown) = self.countdown.as_mut() else {
            return Ok(());
        };
        let fired = countdown.poll(now);
        let remaining = countdown.remaining(now);

        match fired {
            Some(Expiry::PreparationOver) => self.begin_recording(false).await,
            Some(Expiry::RecordingOver) => self.finish_recording(true).await,
            None => {
                if self.phase == Phase::Preparing
                    && !self.warning
                    && !remaining.is_zero()
                    && remaining <= self.timing.warning_threshold
                {
                    self.warning = true;
                    let remaining_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
                    self.events
                        .push(RunnerEvent::PreparationWarning { remaining_secs });
                }
                Ok(())
            }
        }
    }

    /// Skip the rest of the preparation time.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidAction`] outside preparation, or
    /// [`RunnerError::Capture`] if recording cannot start.
    pub async fn start_recording_early(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::Preparing, "start recording")?;
        self.begin_recording(true).await
    }

    /// Stop before the recording countdown runs out.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidAction`] unless recording, or
    /// [`RunnerError::Capture`] if the capture cannot be stopped.
    pub async fn stop_recording(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::Recording, "stop recording")?;
        self.finish_recording(false).await
    }

    /// Discard the reviewed recording and prepare the same question again.
    /// Only the practice question may be re-recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidAction`] outside review or for a real
    /// question.
    pub fn rerecord(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::Reviewing, "re-record")?;
        if !self.current_question().is_practice {
            return Err(RunnerError::InvalidAction {
                action: "re-record an answered question",
                phase: self.phase,
            });
        }
        self.blob = None;
        let question_id = self.current_question().id.clone();
        tracing::info!(question = %question_id, "re-recording practice question");
        self.events.push(RunnerEvent::Rerecording { question_id });
        self.enter_question(self.index);
        Ok(())
    }

    /// Hand the recording to the upload queue and move on. After the last
    /// question the session is completed and the capture released.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidAction`] outside review, or
    /// [`RunnerError::UploadQueueClosed`] if the upload task died.
    pub async fn advance(&mut self) -> Result<(), RunnerError> {
        self.require(Phase::Reviewing, "continue")?;
        let blob = self.blob.take();
        if !self.current_question().is_practice {
            if let (Some(blob), Some(queue)) = (blob, self.uploads.as_ref()) {
                let question_id = blob.question_id.clone();
                queue.enqueue(&self.session.session_id, blob)?;
                self.events.push(RunnerEvent::UploadQueued { question_id });
            }
        }

        if self.index + 1 < self.session.questions.len() {
            self.enter_question(self.index + 1);
        } else {
            self.complete().await;
        }
        Ok(())
    }

    /// Stop wherever the run is. Nothing further is uploaded or completed,
    /// but already queued uploads still finish.
    pub async fn abort(&mut self) {
        if self.is_finished() {
            return;
        }
        self.countdown = None;
        if self.phase == Phase::Recording {
            if let Err(e) = self.capture.stop().await {
                tracing::debug!("discarding capture on abort: {e}");
            }
        }
        self.blob = None;
        self.release_capture().await;
        self.phase = Phase::Complete;
        self.aborted = true;
        tracing::warn!(session = %self.session.session_id, "interview aborted");
        self.events.push(RunnerEvent::Aborted);
    }

    /// Tear down and report. Aborts first if the run is still going.
    pub async fn finish(mut self) -> RunReport {
        if !self.is_finished() {
            self.abort().await;
        }
        self.drain_uploads().await;
        RunReport {
            session_id: self.session.session_id,
            uploads: self.finished_uploads,
            completion: self.completion,
            aborted: self.aborted,
        }
    }

    // --- internals ---

    fn require(&self, expected: Phase, action: &'static str) -> Result<(), RunnerError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RunnerError::InvalidAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn enter_question(&mut self, index: usize) {
        self.index = index;
        self.phase = Phase::Preparing;
        self.warning = false;
        self.blob = None;
        self.capture.set_video_enabled(true);

        let question = &self.session.questions[index];
        self.countdown = Some(Countdown::started(
            Duration::from_secs(u64::from(question.preparation_time)),
            Expiry::PreparationOver,
            self.clock.now(),
        ));
        tracing::info!(
            question = %question.id,
            index,
            preparation_secs = question.preparation_time,
            "preparing question"
        );
        self.events.push(RunnerEvent::QuestionStarted {
            index,
            question_id: question.id.clone(),
            practice: question.is_practice,
        });
    }

    async fn begin_recording(&mut self, early: bool) -> Result<(), RunnerError> {
        self.countdown = None;
        self.warning = false;
        self.capture.set_video_enabled(true);
        self.capture.start().await?;

        let question = &self.session.questions[self.index];
        self.phase = Phase::Recording;
        self.countdown = Some(Countdown::started(
            Duration::from_secs(u64::from(question.recording_time)),
            Expiry::RecordingOver,
            self.clock.now(),
        ));
        tracing::info!(question = %question.id, early, "recording started");
        self.events.push(RunnerEvent::RecordingStarted {
            question_id: question.id.clone(),
            early,
        });
        Ok(())
    }

    async fn finish_recording(&mut self, auto: bool) -> Result<(), RunnerError> {
        self.countdown = None;
        if auto {
            self.capture.request_data().await?;
            if !self.timing.flush_grace.is_zero() {
                tokio::time::sleep(self.timing.flush_grace).await;
            }
        }
        let chunks = self.capture.stop().await?;
        self.capture.set_video_enabled(false);

        let question_id = self.session.questions[self.index].id.clone();
        let blob = RecordingBlob::from_chunks(&question_id, self.capture.mime_type(), chunks);
        tracing::info!(question = %question_id, bytes = blob.len(), auto, "recording stopped");
        self.events.push(RunnerEvent::RecordingStopped {
            question_id,
            bytes: blob.len(),
            auto,
        });
        self.blob = Some(blob);
        self.phase = Phase::Reviewing;
        Ok(())
    }

    async fn complete(&mut self) {
        self.countdown = None;
        self.phase = Phase::Complete;
        self.release_capture().await;
        self.drain_uploads().await;

        if self.completion.is_none() {
            let result = self
                .backend
                .complete_session(&self.session.session_id)
                .await
                .map_err(|e| e.to_string());
            match &result {
                Ok(()) => tracing::info!(session = %self.session.session_id, "interview completed"),
                Err(e) => tracing::error!(session = %self.session.session_id, "completion failed: {e}"),
            }
            self.completion = Some(result);
        }
        self.events.push(RunnerEvent::Completed);
    }

    async fn release_capture(&mut self) {
        if !self.released {
            self.capture.release().await;
            self.released = true;
        }
    }

    async fn drain_uploads(&mut self) {
        if let Some(queue) = self.uploads.take() {
            self.finished_uploads = queue.finish().await;
        }
    }
}
