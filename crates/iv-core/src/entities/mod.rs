//! Entity structs for every shape exchanged with the interview backend.
//!
//! Wire names are camelCase. Ids are normalised to `String` (see [`crate::ids`]).
//! Nothing here is cached; each value lives for one request/render cycle.

mod account;
mod admin;
mod billing;
mod candidate;
mod interview;
mod question;
mod recording;
mod result;
mod token;

pub use account::{LoginRequest, LoginResponse, PasswordChange, ProfileUpdate, UserProfile};
pub use admin::{AdminSettings, AdminUser, ServiceCheck, SystemHealth};
pub use billing::{Plan, Subscription};
pub use candidate::{CandidateSession, SessionStartRequest};
pub use interview::{Interview, InterviewDraft};
pub use question::{Question, QuestionDraft, QuestionOrder, reorder_payload};
pub use recording::RecordingBlob;
pub use result::{Answer, InterviewResult, ResultPatch};
pub use token::{AccessToken, TokenRequest};
