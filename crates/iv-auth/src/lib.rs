//! # iv-auth
//!
//! Client-side session state for Intervue.
//!
//! Everything the web client kept under ad hoc storage keys (`authToken`,
//! `adminToken`, `interviewToken`, ...) lives in one [`SessionStore`] with
//! typed accessors, persisted as a `0600` JSON file. HTTP clients never read
//! the store directly; they go through a [`CredentialProvider`], which also
//! decides what a 401 clears and where the user is sent next.

pub mod credentials;
pub mod error;
pub mod jwt;
pub mod store;

pub use credentials::{CredentialProvider, CredentialScope, StaticCredentials, StoreCredentials};
pub use error::AuthError;
pub use store::{SessionState, SessionStore};
