//! Status enums and roles for Intervue.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and accept the backend's lowercase values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// InterviewStatus
// ---------------------------------------------------------------------------

/// Publication status of an interview template.
///
/// ```text
/// draft → active → closed
///          ↑         │
///          └─────────┘ (reopen)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

impl InterviewStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Active],
            Self::Active => &[Self::Closed],
            Self::Closed => &[Self::Active],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TokenStatus
// ---------------------------------------------------------------------------

/// Status of an interview access token. Never stored; always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    Active,
    Used,
    Expired,
}

impl TokenStatus {
    /// Derive the status of a token at `now`.
    ///
    /// Expiry wins over usage: a used token past its expiry reports `Expired`.
    /// A token without an expiry never expires.
    #[must_use]
    pub fn derive(expires_at: Option<DateTime<Utc>>, used: bool, now: DateTime<Utc>) -> Self {
        match expires_at {
            Some(expiry) if now > expiry => Self::Expired,
            _ if used => Self::Used,
            _ => Self::Active,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role reported by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Recruiter,
    Candidate,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Recruiter => "recruiter",
            Self::Candidate => "candidate",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[rstest]
    #[case::no_expiry_unused(None, false, TokenStatus::Active)]
    #[case::no_expiry_used(None, true, TokenStatus::Used)]
    #[case::future_expiry_unused(Some(at(13)), false, TokenStatus::Active)]
    #[case::future_expiry_used(Some(at(13)), true, TokenStatus::Used)]
    #[case::past_expiry_unused(Some(at(11)), false, TokenStatus::Expired)]
    #[case::past_expiry_used(Some(at(11)), true, TokenStatus::Expired)]
    fn token_status_derivation(
        #[case] expires_at: Option<DateTime<Utc>>,
        #[case] used: bool,
        #[case] expected: TokenStatus,
    ) {
        assert_eq!(TokenStatus::derive(expires_at, used, at(12)), expected);
    }

    #[test]
    fn token_expiring_exactly_now_is_not_expired() {
        let now = at(12);
        assert_eq!(TokenStatus::derive(Some(now), false, now), TokenStatus::Active);
        assert_eq!(
            TokenStatus::derive(Some(now), false, now + Duration::milliseconds(1)),
            TokenStatus::Expired
        );
    }

    #[test]
    fn interview_status_transitions() {
        assert!(InterviewStatus::Draft.can_transition_to(InterviewStatus::Active));
        assert!(!InterviewStatus::Draft.can_transition_to(InterviewStatus::Closed));
        assert!(InterviewStatus::Closed.can_transition_to(InterviewStatus::Active));
    }

    #[test]
    fn roles_use_lowercase_wire_names() {
        let role: UserRole = serde_json::from_str("\"recruiter\"").unwrap();
        assert_eq!(role, UserRole::Recruiter);
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }
}
