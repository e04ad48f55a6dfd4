pub mod admin;
pub mod auth;
pub mod billing;
pub mod dispatch;
pub mod interview;
pub mod profile;
pub mod question;
pub mod result;
pub mod run;
pub mod shared;
pub mod token;
