use chrono::Utc;
use serde::Serialize;

use iv_core::enums::UserRole;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CredentialStatus {
    present: bool,
    expires_at: Option<String>,
    expired: Option<bool>,
}

impl CredentialStatus {
    fn of(token: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            present: token.is_some(),
            expires_at: token
                .and_then(|t| iv_auth::jwt::decode_expiry(t).ok())
                .map(|exp| exp.to_rfc3339()),
            expired: token.and_then(|t| iv_auth::jwt::is_expired(t, now)),
        }
    }
}

#[derive(Serialize)]
struct AuthStatusResponse {
    user: CredentialStatus,
    role: Option<UserRole>,
    admin: CredentialStatus,
    active_interview: Option<String>,
    session_file: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let admin_token = ctx.store.admin_token().filter(|_| ctx.store.is_admin());
    let status = AuthStatusResponse {
        user: CredentialStatus::of(ctx.store.auth_token().as_deref()),
        role: ctx.store.user_role(),
        admin: CredentialStatus::of(admin_token.as_deref()),
        active_interview: ctx.store.active_interview_id(),
        session_file: ctx.store.path().map(|p| p.display().to_string()),
    };
    output(&status, flags.format)
}
