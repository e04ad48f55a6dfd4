use std::sync::Arc;

use anyhow::Context;
use iv_api::ApiClient;
use iv_auth::{AuthError, SessionState, SessionStore, StoreCredentials};
use iv_config::IntervueConfig;

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    pub config: IntervueConfig,
    pub store: Arc<SessionStore>,
    /// Recruiter/candidate surface, authenticated with the user token.
    pub api: ApiClient,
    /// Admin console, authenticated with the admin token.
    pub admin: ApiClient,
    /// Candidate session endpoints; no bearer, 401 returns to token entry.
    pub candidate: ApiClient,
}

impl AppContext {
    pub fn init(config: IntervueConfig) -> anyhow::Result<Self> {
        let store = Arc::new(open_store(&config)?);
        let api = ApiClient::new(
            &config.api,
            Arc::new(StoreCredentials::user(Arc::clone(&store))),
        )
        .context("failed to build API client")?;
        let admin = api.with_credentials(Arc::new(StoreCredentials::admin(Arc::clone(&store))));
        let candidate =
            api.with_credentials(Arc::new(StoreCredentials::candidate(Arc::clone(&store))));

        Ok(Self {
            config,
            store,
            api,
            admin,
            candidate,
        })
    }

    /// Fail early when no user token is stored.
    pub fn require_user(&self) -> Result<(), AuthError> {
        self.store
            .auth_token()
            .map(drop)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Fail early when no admin token is stored.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.store.is_admin() && self.store.admin_token().is_some() {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }
}

fn open_store(config: &IntervueConfig) -> anyhow::Result<SessionStore> {
    match config.storage.session_path() {
        Some(path) => SessionStore::open(&path)
            .with_context(|| format!("failed to open session file {}", path.display())),
        None => {
            tracing::warn!("no home directory; session state will not be persisted");
            Ok(SessionStore::in_memory(SessionState::default()))
        }
    }
}
