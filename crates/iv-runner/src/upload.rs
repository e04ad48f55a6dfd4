//! Background upload of answered questions.
//!
//! Recordings are queued and uploaded one at a time on a separate task, so
//! the candidate moves on immediately. Each job gets a bounded number of
//! attempts with exponential backoff; its progress is published per
//! question through a `watch` channel.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use iv_api::ApiError;
use iv_config::UploadConfig;
use iv_core::entities::RecordingBlob;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::RunnerError;
use crate::session::CandidateBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Queued,
    Uploading { attempt: u32 },
    Uploaded,
    Failed { attempts: u32, error: String },
}

impl UploadStatus {
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Uploaded | Self::Failed { .. })
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => f.write_str("queued"),
            Self::Uploading { attempt } => write!(f, "uploading (attempt {attempt})"),
            Self::Uploaded => f.write_str("uploaded"),
            Self::Failed { attempts, error } => {
                write!(f, "failed after {attempts} attempt(s): {error}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub question_id: String,
    pub bytes: usize,
    pub status: UploadStatus,
}

#[derive(Debug)]
struct UploadJob {
    session_id: String,
    blob: RecordingBlob,
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based count of failures so far).
    fn delay(&self, attempt: u32, error: &ApiError) -> Duration {
        let exp = self
            .backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        match error {
            ApiError::RateLimited { retry_after_secs } => {
                exp.max(Duration::from_secs(*retry_after_secs))
            }
            _ => exp,
        }
    }
}

/// Handle to the upload task.
#[derive(Debug)]
pub struct UploadQueue {
    jobs: mpsc::UnboundedSender<UploadJob>,
    status: watch::Receiver<Vec<UploadEntry>>,
    worker: JoinHandle<()>,
}

impl UploadQueue {
    /// Spawn the upload task on the current runtime.
    #[must_use]
    pub fn spawn(backend: Arc<dyn CandidateBackend>, config: &UploadConfig) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(Vec::new());
        let policy = RetryPolicy {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.backoff_ms),
        };
        let worker = tokio::spawn(run_worker(backend, policy, rx, status_tx));
        Self {
            jobs,
            status,
            worker,
        }
    }

    /// Queue a recording. Returns immediately.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::UploadQueueClosed`] if the upload task is gone.
    pub fn enqueue(&self, session_id: &str, blob: RecordingBlob) -> Result<(), RunnerError> {
        tracing::debug!(question = %blob.question_id, bytes = blob.len(), "upload queued");
        self.jobs
            .send(UploadJob {
                session_id: session_id.to_string(),
                blob,
            })
            .map_err(|_| RunnerError::UploadQueueClosed)
    }

    /// Current status of every job queued so far, in queue order.
    #[must_use]
    pub fn statuses(&self) -> Vec<UploadEntry> {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<UploadEntry>> {
        self.status.clone()
    }

    /// Stop accepting jobs, wait for the queued ones and return final statuses.
    pub async fn finish(self) -> Vec<UploadEntry> {
        let Self {
            jobs,
            status,
            worker,
        } = self;
        drop(jobs);
        if let Err(e) = worker.await {
            tracing::error!("upload task ended abnormally: {e}");
        }
        let entries = status.borrow().clone();
        entries
    }
}

async fn run_worker(
    backend: Arc<dyn CandidateBackend>,
    policy: RetryPolicy,
    mut jobs: mpsc::UnboundedReceiver<UploadJob>,
    status: watch::Sender<Vec<UploadEntry>>,
) {
    // Jobs are registered as soon as they arrive so `Queued` is visible
    // while an earlier upload is still running.
    let mut pending = VecDeque::new();
    loop {
        while let Ok(job) = jobs.try_recv() {
            pending.push_back(register(&status, job));
        }
        let Some((index, job)) = pending.pop_front() else {
            match jobs.recv().await {
                Some(job) => {
                    pending.push_back(register(&status, job));
                    continue;
                }
                None => break,
            }
        };
        let outcome = upload_with_retry(backend.as_ref(), policy, &job, index, &status).await;
        set_status(&status, index, outcome);
    }
}

fn register(status: &watch::Sender<Vec<UploadEntry>>, job: UploadJob) -> (usize, UploadJob) {
    let mut index = 0;
    status.send_modify(|entries| {
        index = entries.len();
        entries.push(UploadEntry {
            question_id: job.blob.question_id.clone(),
            bytes: job.blob.len(),
            status: UploadStatus::Queued,
        });
    });
    (index, job)
}

fn set_status(status: &watch::Sender<Vec<UploadEntry>>, index: usize, next: UploadStatus) {
    status.send_modify(|entries| {
        if let Some(entry) = entries.get_mut(index) {
            entry.status = next;
        }
    });
}

async fn upload_with_retry(
    backend: &dyn CandidateBackend,
    policy: RetryPolicy,
    job: &UploadJob,
    index: usize,
    status: &watch::Sender<Vec<UploadEntry>>,
) -> UploadStatus {
    let question = &job.blob.question_id;
    let mut attempt = 1;
    loop {
        set_status(status, index, UploadStatus::Uploading { attempt });
        match backend.upload_recording(&job.session_id, &job.blob).await {
            Ok(()) => {
                tracing::info!(%question, attempt, "recording uploaded");
                return UploadStatus::Uploaded;
            }
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.delay(attempt, &e);
                tracing::warn!(%question, attempt, "upload failed, retrying in {delay:?}: {e}");
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(%question, attempt, "upload failed: {e}");
                return UploadStatus::Failed {
                    attempts: attempt,
                    error: e.to_string(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 500)]
    #[case(2, 1000)]
    #[case(3, 2000)]
    fn backoff_doubles(#[case] attempt: u32, #[case] expected_ms: u64) {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff: Duration::from_millis(500),
        };
        let err = ApiError::Api {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(policy.delay(attempt, &err), Duration::from_millis(expected_ms));
    }

    #[test]
    fn rate_limit_waits_at_least_retry_after() {
        let policy = RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(10),
        };
        let err = ApiError::RateLimited {
            retry_after_secs: 2,
        };
        assert_eq!(policy.delay(1, &err), Duration::from_secs(2));
    }
}
