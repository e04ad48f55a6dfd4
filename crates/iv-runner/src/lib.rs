//! # iv-runner
//!
//! The candidate side of an interview: a per-question state machine
//! (Preparing → Recording → Reviewing → next question or Complete) driven by
//! wall-clock countdowns, a media capture behind [`MediaCapture`], and a
//! background [`UploadQueue`] that retries recordings without ever holding up
//! the candidate.
//!
//! [`open_session`] exchanges an interview token for a session,
//! [`InterviewRunner`] owns the state machine and [`Driver`] runs it on one
//! task against a stream of [`CandidateAction`]s.

pub mod capture;
pub mod clock;
pub mod countdown;
pub mod driver;
pub mod error;
pub mod runner;
pub mod session;
pub mod upload;

pub use capture::{CaptureError, CommandCapture, MediaCapture, MemoryCapture};
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::Countdown;
pub use driver::{CandidateAction, DriveOptions, Driver};
pub use error::RunnerError;
pub use runner::{InterviewRunner, Phase, RunReport, RunnerEvent, RunnerSnapshot, RunnerTiming};
pub use session::{CandidateBackend, PreparedSession, open_session};
pub use upload::{UploadEntry, UploadQueue, UploadStatus};
