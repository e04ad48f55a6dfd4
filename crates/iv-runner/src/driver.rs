//! Runs an [`InterviewRunner`] on one task.
//!
//! The loop `select!`s over a tick interval and the candidate's actions, so a
//! countdown expiry and a manual stop can never interleave: whichever arrives
//! first transitions the runner and the other finds the phase already moved.

use std::time::Duration;

use iv_config::RunnerConfig;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::error::RunnerError;
use crate::runner::{InterviewRunner, Phase, RunReport, RunnerEvent, RunnerSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAction {
    StartRecording,
    StopRecording,
    Rerecord,
    Continue,
    Abort,
}

impl CandidateAction {
    /// Single-letter console command: `s`, `x`, `r`, `n`, `q`.
    #[must_use]
    pub fn from_key(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => Some(Self::StartRecording),
            "x" | "stop" => Some(Self::StopRecording),
            "r" | "rerecord" => Some(Self::Rerecord),
            "n" | "next" | "continue" => Some(Self::Continue),
            "q" | "quit" | "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveOptions {
    pub tick: Duration,
    /// Continue automatically after each recording instead of waiting for
    /// the candidate.
    pub auto_advance: bool,
}

impl From<&RunnerConfig> for DriveOptions {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_interval_ms.max(1)),
            auto_advance: false,
        }
    }
}

const EVENT_CAPACITY: usize = 64;

pub struct Driver {
    runner: InterviewRunner,
    options: DriveOptions,
    events: broadcast::Sender<RunnerEvent>,
    snapshots: watch::Sender<RunnerSnapshot>,
}

impl Driver {
    #[must_use]
    pub fn new(runner: InterviewRunner, options: DriveOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshots, _) = watch::channel(runner.snapshot());
        Self {
            runner,
            options,
            events,
            snapshots,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RunnerEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn snapshots(&self) -> watch::Receiver<RunnerSnapshot> {
        self.snapshots.subscribe()
    }

    /// Run until the interview completes or is aborted.
    ///
    /// Once `actions` closes the run continues on its own, advancing after
    /// each recording.
    ///
    /// # Errors
    ///
    /// Returns the first capture or upload-queue failure. The capture is
    /// released and queued uploads are awaited before returning.
    pub async fn run(
        mut self,
        mut actions: mpsc::Receiver<CandidateAction>,
    ) -> Result<RunReport, RunnerError> {
        let mut interval = tokio::time::interval(self.options.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut listening = true;
        self.publish();

        while !self.runner.is_finished() {
            let step = tokio::select! {
                _ = interval.tick() => self.on_tick().await,
                action = actions.recv(), if listening => match action {
                    Some(action) => self.on_action(action).await,
                    None => {
                        tracing::debug!("candidate input closed, advancing automatically");
                        listening = false;
                        self.options.auto_advance = true;
                        Ok(())
                    }
                },
            };

            match step {
                Ok(()) => {}
                Err(RunnerError::InvalidAction { action, phase }) => {
                    let reason = format!("cannot {action} while {phase}");
                    tracing::debug!("{reason}");
                    let _ = self.events.send(RunnerEvent::ActionRejected { reason });
                }
                Err(e) => {
                    tracing::error!("interview run failed: {e}");
                    self.publish();
                    let report = self.runner.finish().await;
                    tracing::debug!(uploads = report.uploads.len(), "run torn down after failure");
                    return Err(e);
                }
            }
            self.publish();
        }

        Ok(self.runner.finish().await)
    }

    async fn on_tick(&mut self) -> Result<(), RunnerError> {
        self.runner.tick().await?;
        if self.options.auto_advance && self.runner.phase() == Phase::Reviewing {
            self.runner.advance().await?;
        }
        Ok(())
    }

    async fn on_action(&mut self, action: CandidateAction) -> Result<(), RunnerError> {
        match action {
            CandidateAction::StartRecording => self.runner.start_recording_early().await,
            CandidateAction::StopRecording => self.runner.stop_recording().await,
            CandidateAction::Rerecord => self.runner.rerecord(),
            CandidateAction::Continue => self.runner.advance().await,
            CandidateAction::Abort => {
                self.runner.abort().await;
                Ok(())
            }
        }
    }

    fn publish(&mut self) {
        for event in self.runner.drain_events() {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        self.snapshots.send_replace(self.runner.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s", Some(CandidateAction::StartRecording))]
    #[case(" X\n", Some(CandidateAction::StopRecording))]
    #[case("r", Some(CandidateAction::Rerecord))]
    #[case("n", Some(CandidateAction::Continue))]
    #[case("quit", Some(CandidateAction::Abort))]
    #[case("?", None)]
    #[case("", None)]
    fn console_keys(#[case] input: &str, #[case] expected: Option<CandidateAction>) {
        assert_eq!(CandidateAction::from_key(input), expected);
    }

    #[test]
    fn options_follow_tick_interval() {
        let config = RunnerConfig {
            tick_interval_ms: 50,
            ..Default::default()
        };
        let options = DriveOptions::from(&config);
        assert_eq!(options.tick, Duration::from_millis(50));
        assert!(!options.auto_advance);
    }
}
