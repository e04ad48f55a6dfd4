//! `ivr run`: take an interview as a candidate.

mod console;

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::sync::mpsc;

use iv_runner::{
    CommandCapture, DriveOptions, Driver, InterviewRunner, MediaCapture, MemoryCapture,
    RunReport, RunnerError, RunnerTiming, SystemClock, open_session,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

const ACTION_BUFFER: usize = 16;

#[derive(Debug, Serialize)]
struct UploadRow {
    question_id: String,
    bytes: usize,
    status: String,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    session_id: String,
    completed: bool,
    aborted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion_error: Option<String>,
    failed_uploads: usize,
    uploads: Vec<UploadRow>,
}

impl From<&RunReport> for RunSummary {
    fn from(report: &RunReport) -> Self {
        Self {
            session_id: report.session_id.clone(),
            completed: report.is_success(),
            aborted: report.aborted,
            completion_error: report.completion.clone().and_then(Result::err),
            failed_uploads: report.failed_uploads(),
            uploads: report
                .uploads
                .iter()
                .map(|entry| UploadRow {
                    question_id: entry.question_id.clone(),
                    bytes: entry.bytes,
                    status: entry.status.to_string(),
                })
                .collect(),
        }
    }
}

/// Handle `ivr run`.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = &ctx.config;
    if !args.simulate {
        config.capture.ensure_configured()?;
    }

    let session = with_spinner(
        "Starting interview...",
        open_session(
            &ctx.candidate,
            &ctx.store,
            &args.token,
            args.name.as_deref(),
            &config.runner,
        ),
    )
    .await
    .map_err(with_redirect)?;
    tracing::info!(
        session = %session.session_id,
        questions = session.answered_question_count(),
        "interview session started"
    );

    let capture: Box<dyn MediaCapture> = if args.simulate {
        Box::new(MemoryCapture::new(&config.capture.mime_type))
    } else {
        Box::new(CommandCapture::new(config.capture.clone()))
    };

    let runner = InterviewRunner::start(
        session,
        capture,
        Arc::new(ctx.candidate.clone()),
        Arc::new(SystemClock),
        RunnerTiming::from(&config.runner),
        &config.upload,
    )
    .await
    .map_err(with_redirect)?;

    let options = DriveOptions {
        auto_advance: args.auto,
        ..DriveOptions::from(&config.runner)
    };
    let driver = Driver::new(runner, options);
    let render = console::spawn_render(driver.subscribe(), driver.snapshots());

    let (actions, receiver) = mpsc::channel(ACTION_BUFFER);
    eprintln!("{}", console::HELP);
    console::spawn_input(actions);

    let result = driver.run(receiver).await;
    if let Err(error) = render.await {
        tracing::debug!("display task ended abnormally: {error}");
    }
    let report = result.map_err(with_redirect)?;

    ctx.store
        .clear_interview()
        .context("failed to clear interview state")?;

    let summary = RunSummary::from(&report);
    output(&summary, flags.format)?;

    if summary.failed_uploads > 0 {
        tracing::warn!(failed = summary.failed_uploads, "some answers were not uploaded");
    }
    if let Some(message) = summary.completion_error {
        anyhow::bail!("interview could not be submitted: {message}");
    }
    Ok(())
}

/// Attach the recovery route to failures that have one.
fn with_redirect(error: RunnerError) -> anyhow::Error {
    match error.redirect() {
        Some(redirect) => {
            anyhow::Error::new(error).context(format!("continue at {}", redirect.path()))
        }
        None => error.into(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use iv_runner::{UploadEntry, UploadStatus};

    use super::*;

    fn report(uploads: Vec<UploadEntry>, completion: Option<Result<(), String>>) -> RunReport {
        RunReport {
            session_id: "sess-1".into(),
            uploads,
            completion,
            aborted: false,
        }
    }

    #[test]
    fn summary_counts_failed_uploads() {
        let report = report(
            vec![
                UploadEntry {
                    question_id: "q1".into(),
                    bytes: 9,
                    status: UploadStatus::Uploaded,
                },
                UploadEntry {
                    question_id: "q2".into(),
                    bytes: 9,
                    status: UploadStatus::Failed {
                        attempts: 3,
                        error: "bad gateway".into(),
                    },
                },
            ],
            Some(Ok(())),
        );
        let summary = RunSummary::from(&report);
        assert!(summary.completed);
        assert_eq!(summary.failed_uploads, 1);
        assert_eq!(summary.uploads[0].status, UploadStatus::Uploaded.to_string());
    }

    #[test]
    fn completion_failure_is_surfaced() {
        let summary = RunSummary::from(&report(Vec::new(), Some(Err("gone".into()))));
        assert!(!summary.completed);
        assert_eq!(summary.completion_error.as_deref(), Some("gone"));
    }

    #[test]
    fn start_failures_name_the_recovery_route() {
        let error = with_redirect(RunnerError::MediaUnavailable(
            iv_runner::CaptureError::NotConfigured,
        ));
        assert!(format!("{error:#}").contains("/interview/instructions"));

        let error = with_redirect(RunnerError::NoQuestions);
        assert_eq!(error.to_string(), "interview has no questions");
    }
}
