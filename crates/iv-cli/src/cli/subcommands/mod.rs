mod admin;
mod auth;
mod billing;
mod interview;
mod profile;
mod question;
mod result;
mod token;

pub use admin::AdminCommands;
pub use auth::{AuthCommands, AuthLoginArgs, AuthLogoutArgs};
pub use billing::BillingCommands;
pub use interview::{InterviewCommands, InterviewFields};
pub use profile::ProfileCommands;
pub use question::{QuestionCommands, QuestionFields};
pub use result::ResultCommands;
pub use token::TokenCommands;
