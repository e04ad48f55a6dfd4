//! Client-side navigation targets.
//!
//! Failures that in a browser would force a page change are reported as a
//! [`Redirect`] so callers decide how to surface them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Redirect {
    /// Recruiter/candidate login.
    Login,
    /// Admin console login (admin credentials rejected).
    AdminLogin,
    /// Camera/microphone setup instructions.
    Instructions,
    /// Interview token entry (token rejected or already used).
    TokenEntry,
}

impl Redirect {
    /// Route path as the web client names it.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::AdminLogin => "/admin/login",
            Self::Instructions => "/interview/instructions",
            Self::TokenEntry => "/interview",
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
