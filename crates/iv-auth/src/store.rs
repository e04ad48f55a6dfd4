use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use iv_core::entities::LoginResponse;
use iv_core::enums::UserRole;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Env var consulted when no user token is stored (CI / scripted use).
pub const TOKEN_ENV_VAR: &str = "INTERVUE_AUTH__TOKEN";

/// Everything the client remembers between invocations.
///
/// Field names on disk match the web client's storage keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
    /// Interview token entered by a candidate but not yet accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_interview_id: Option<String>,
    /// Interview token accepted by the backend for the running session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_token: Option<String>,
}

/// File-backed, injectable replacement for browser storage.
///
/// Every mutation is written through to disk before returning. A store opened
/// with [`SessionStore::in_memory`] never touches the filesystem.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Open the store at `path`, loading existing state if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the file exists but cannot be
    /// read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| AuthError::TokenStoreError(format!("read {}: {e}", path.display())))?;
            if raw.trim().is_empty() {
                SessionState::default()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AuthError::TokenStoreError(format!("parse {}: {e}", path.display()))
                })?
            }
        } else {
            SessionState::default()
        };
        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory(state: SessionState) -> Self {
        Self {
            path: None,
            state: RwLock::new(state),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `change` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails. The in-memory
    /// state keeps the change either way.
    pub fn update(&self, change: impl FnOnce(&mut SessionState)) -> Result<(), AuthError> {
        let next = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            change(&mut guard);
            guard.clone()
        };
        self.persist(&next)
    }

    // --- typed accessors ---

    /// User bearer token: stored value first, then [`TOKEN_ENV_VAR`].
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.snapshot()
            .auth_token
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }

    #[must_use]
    pub fn admin_token(&self) -> Option<String> {
        self.snapshot().admin_token.filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn user_role(&self) -> Option<UserRole> {
        self.snapshot().user_role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.snapshot().is_admin
    }

    #[must_use]
    pub fn interview_token(&self) -> Option<String> {
        self.snapshot().interview_token
    }

    #[must_use]
    pub fn active_interview_id(&self) -> Option<String> {
        self.snapshot().active_interview_id
    }

    // --- lifecycle helpers ---

    /// Remember a successful user login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn record_login(&self, login: &LoginResponse) -> Result<(), AuthError> {
        self.update(|s| {
            s.auth_token = Some(login.token.clone());
            s.user_role = login.role;
        })
    }

    /// Remember a successful admin login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn record_admin_login(&self, token: &str) -> Result<(), AuthError> {
        self.update(|s| {
            s.admin_token = Some(token.to_string());
            s.is_admin = true;
        })
    }

    /// Forget user credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn clear_user(&self) -> Result<(), AuthError> {
        self.update(|s| {
            s.auth_token = None;
            s.user_role = None;
        })
    }

    /// Forget admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn clear_admin(&self) -> Result<(), AuthError> {
        self.update(|s| {
            s.admin_token = None;
            s.is_admin = false;
        })
    }

    /// Record a candidate-entered interview token before the backend accepts it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn begin_interview(&self, token: &str) -> Result<(), AuthError> {
        self.update(|s| s.pending_token = Some(token.to_string()))
    }

    /// Promote the pending token once the backend started a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn accept_interview(&self, interview_id: &str) -> Result<(), AuthError> {
        self.update(|s| {
            s.interview_token = s.pending_token.take();
            s.active_interview_id = Some(interview_id.to_string());
        })
    }

    /// Drop every interview slot (token rejected, or interview finished).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if persisting fails.
    pub fn clear_interview(&self) -> Result<(), AuthError> {
        self.update(|s| {
            s.pending_token = None;
            s.interview_token = None;
            s.active_interview_id = None;
        })
    }

    /// Remove the file and reset to empty state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the file cannot be removed.
    pub fn clear_all(&self) -> Result<(), AuthError> {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::default();
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path).map_err(|e| {
                    AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
                })?;
            }
        }
        Ok(())
    }

    fn persist(&self, state: &SessionState) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;
        fs::write(path, json)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
        }

        Ok(())
    }
}
