//! Terminal side of `ivr run`: keystrokes in, countdown and event lines out.

use std::io::BufRead;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use iv_runner::{CandidateAction, Phase, RunnerEvent, RunnerSnapshot};

use crate::progress::Progress;

pub const HELP: &str = "keys: s=start recording  x=stop  r=re-record (practice)  n=next  q=quit";

/// Read one action per line from stdin on a plain thread.
///
/// Stdin reads cannot be cancelled, so the thread is left detached; once the
/// run ends nobody receives from `actions` and the thread exits on its next
/// line or with the process.
pub fn spawn_input(actions: mpsc::Sender<CandidateAction>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match CandidateAction::from_key(&line) {
                Some(action) => {
                    if actions.blocking_send(action).is_err() {
                        break;
                    }
                }
                None => eprintln!("unknown key '{}'; {HELP}", line.trim()),
            }
        }
        tracing::debug!("stdin closed");
    });
}

/// Mirror the driver's state on stderr until both channels close.
pub fn spawn_render(
    mut events: broadcast::Receiver<RunnerEvent>,
    mut snapshots: watch::Receiver<RunnerSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut screen = Screen::default();
        screen.show(&snapshots.borrow_and_update().clone());
        let mut events_open = true;
        let mut snapshots_open = true;

        while events_open || snapshots_open {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Ok(event) => {
                        if let Some(line) = describe(&event) {
                            screen.println(&line);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::debug!(missed, "display fell behind runner events");
                    }
                    Err(broadcast::error::RecvError::Closed) => events_open = false,
                },
                changed = snapshots.changed(), if snapshots_open => {
                    if changed.is_ok() {
                        let snapshot = snapshots.borrow_and_update().clone();
                        screen.show(&snapshot);
                    } else {
                        snapshots_open = false;
                    }
                }
            }
        }
        screen.close();
    })
}

/// One countdown bar per timed phase.
#[derive(Default)]
struct Screen {
    bar: Option<Progress>,
    shown: Option<(usize, Phase)>,
}

impl Screen {
    fn show(&mut self, snapshot: &RunnerSnapshot) {
        let key = (snapshot.index, snapshot.phase);
        if self.shown != Some(key) {
            self.close();
            self.shown = Some(key);
            if snapshot.phase == Phase::Preparing {
                let header = match snapshot.question_number {
                    Some(number) => format!("Question {number} of {}", snapshot.question_count),
                    None => "Practice question (not submitted)".to_string(),
                };
                self.println(&format!("\n{header}\n  {}", snapshot.question_text));
            }
            if let Some(remaining) = snapshot.remaining_secs {
                self.bar = Some(Progress::countdown(remaining, &bar_label(snapshot)));
            } else if snapshot.phase == Phase::Reviewing {
                let hint = if snapshot.can_rerecord {
                    "recorded; r to re-record, n to continue"
                } else {
                    "recorded; n to continue"
                };
                self.println(hint);
            }
        }
        if let (Some(bar), Some(remaining)) = (&self.bar, snapshot.remaining_secs) {
            bar.set_remaining(remaining);
            if snapshot.warning {
                bar.set_message(&format!("{} (hurry)", bar_label(snapshot)));
            }
        }
    }

    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_clear();
        }
    }
}

fn bar_label(snapshot: &RunnerSnapshot) -> String {
    let position = snapshot.question_number.map_or_else(
        || "practice".to_string(),
        |number| format!("Q{number}/{}", snapshot.question_count),
    );
    format!("{position} {}", snapshot.phase)
}

/// Console line for an event, if it warrants one.
pub fn describe(event: &RunnerEvent) -> Option<String> {
    let line = match event {
        // The question text itself is printed when its preparation bar opens.
        RunnerEvent::QuestionStarted { .. } => return None,
        RunnerEvent::PreparationWarning { remaining_secs } => {
            format!("{remaining_secs}s left to prepare")
        }
        RunnerEvent::RecordingStarted { early, .. } => {
            if *early {
                "recording (started early)".to_string()
            } else {
                "recording".to_string()
            }
        }
        RunnerEvent::RecordingStopped { bytes, auto, .. } => {
            let how = if *auto { "time up" } else { "stopped" };
            format!("{how}: {bytes} bytes captured")
        }
        RunnerEvent::Rerecording { .. } => "re-recording practice answer".to_string(),
        RunnerEvent::UploadQueued { question_id } => format!("answer {question_id} queued for upload"),
        RunnerEvent::Completed => "interview complete".to_string(),
        RunnerEvent::Aborted => "interview aborted".to_string(),
        RunnerEvent::ActionRejected { reason } => reason.clone(),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn question_start_is_left_to_the_bar() {
        let event = RunnerEvent::QuestionStarted {
            index: 1,
            question_id: "q2".into(),
            practice: false,
        };
        assert_eq!(describe(&event), None);
    }

    #[test]
    fn auto_stop_and_rejections_are_reported() {
        let stopped = RunnerEvent::RecordingStopped {
            question_id: "q1".into(),
            bytes: 18,
            auto: true,
        };
        assert_eq!(describe(&stopped).as_deref(), Some("time up: 18 bytes captured"));
        let rejected = RunnerEvent::ActionRejected {
            reason: "cannot rerecord while recording".into(),
        };
        assert_eq!(
            describe(&rejected).as_deref(),
            Some("cannot rerecord while recording")
        );
    }

    fn snapshot(index: usize, is_practice: bool) -> RunnerSnapshot {
        RunnerSnapshot {
            phase: Phase::Recording,
            index,
            total: 3,
            question_number: (!is_practice).then_some(index),
            question_count: 2,
            question_id: format!("q{index}"),
            question_text: "Why us?".into(),
            is_practice,
            remaining_secs: Some(30),
            warning: false,
            can_rerecord: false,
            recorded_bytes: None,
        }
    }

    #[test]
    fn bar_label_skips_the_practice_question() {
        assert_eq!(bar_label(&snapshot(0, true)), "practice recording");
        assert_eq!(bar_label(&snapshot(1, false)), "Q1/2 recording");
        assert_eq!(bar_label(&snapshot(2, false)), "Q2/2 recording");
    }
}
