//! Credential providers used by the HTTP client.
//!
//! One client type serves both the recruiter/candidate surface and the admin
//! console; the provider it is built with decides which token is attached and
//! what a 401 does.

use std::fmt;
use std::sync::Arc;

use iv_core::routes::Redirect;

use crate::store::SessionStore;

/// Which stored credential a provider speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    User,
    Admin,
    /// Interview-token holder; requests carry no bearer.
    Candidate,
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Candidate => "candidate",
        })
    }
}

pub trait CredentialProvider: Send + Sync + fmt::Debug {
    fn scope(&self) -> CredentialScope;

    /// Bearer token to attach, if any.
    fn bearer_token(&self) -> Option<String>;

    /// Drop the rejected credentials and say where the user must go next.
    fn on_unauthorized(&self) -> Redirect;
}

/// Provider backed by the shared [`SessionStore`].
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    store: Arc<SessionStore>,
    scope: CredentialScope,
}

impl StoreCredentials {
    #[must_use]
    pub const fn user(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            scope: CredentialScope::User,
        }
    }

    #[must_use]
    pub const fn admin(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            scope: CredentialScope::Admin,
        }
    }

    /// Candidate session calls. A 401 means the interview token is no longer
    /// valid, so the interview slots are cleared instead of a login.
    #[must_use]
    pub const fn candidate(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            scope: CredentialScope::Candidate,
        }
    }
}

impl CredentialProvider for StoreCredentials {
    fn scope(&self) -> CredentialScope {
        self.scope
    }

    fn bearer_token(&self) -> Option<String> {
        match self.scope {
            CredentialScope::User => self.store.auth_token(),
            CredentialScope::Admin => self.store.admin_token(),
            CredentialScope::Candidate => None,
        }
    }

    fn on_unauthorized(&self) -> Redirect {
        let (cleared, redirect) = match self.scope {
            CredentialScope::User => (self.store.clear_user(), Redirect::Login),
            CredentialScope::Admin => (self.store.clear_admin(), Redirect::AdminLogin),
            CredentialScope::Candidate => (self.store.clear_interview(), Redirect::TokenEntry),
        };
        if let Err(error) = cleared {
            tracing::warn!(scope = %self.scope, %error, "failed to clear rejected credentials");
        }
        tracing::info!(scope = %self.scope, %redirect, "credentials rejected; cleared");
        redirect
    }
}

/// Fixed token, no persistence. For scripted calls and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl CredentialProvider for StaticCredentials {
    fn scope(&self) -> CredentialScope {
        CredentialScope::User
    }

    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn on_unauthorized(&self) -> Redirect {
        Redirect::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionState;

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::in_memory(SessionState {
            auth_token: Some("user-jwt".into()),
            admin_token: Some("admin-jwt".into()),
            is_admin: true,
            ..Default::default()
        }))
    }

    #[test]
    fn scopes_read_their_own_slot() {
        let store = store();
        assert_eq!(
            StoreCredentials::user(store.clone()).bearer_token().as_deref(),
            Some("user-jwt")
        );
        assert_eq!(
            StoreCredentials::admin(store).bearer_token().as_deref(),
            Some("admin-jwt")
        );
    }

    #[test]
    fn admin_unauthorized_clears_admin_only() {
        let store = store();
        let admin = StoreCredentials::admin(store.clone());
        assert_eq!(admin.on_unauthorized(), Redirect::AdminLogin);
        assert!(admin.bearer_token().is_none());
        assert!(!store.is_admin());
        assert_eq!(store.snapshot().auth_token.as_deref(), Some("user-jwt"));
    }

    #[test]
    fn candidate_unauthorized_returns_to_token_entry() {
        let store = store();
        store.begin_interview("tok-1").unwrap();
        store.accept_interview("int-9").unwrap();
        let candidate = StoreCredentials::candidate(store.clone());
        assert!(candidate.bearer_token().is_none());

        assert_eq!(candidate.on_unauthorized(), Redirect::TokenEntry);
        let state = store.snapshot();
        assert!(state.interview_token.is_none());
        assert!(state.active_interview_id.is_none());
        assert_eq!(state.auth_token.as_deref(), Some("user-jwt"));
    }

    #[test]
    fn user_unauthorized_redirects_to_login() {
        let store = store();
        let user = StoreCredentials::user(store.clone());
        assert_eq!(user.on_unauthorized(), Redirect::Login);
        assert!(store.snapshot().auth_token.is_none());
        assert_eq!(store.admin_token().as_deref(), Some("admin-jwt"));
    }
}
