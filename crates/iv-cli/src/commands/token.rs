use chrono::Utc;
use serde::Serialize;

use iv_core::entities::{AccessToken, TokenRequest};
use iv_core::enums::TokenStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TokenCommands;
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// A token as listed: the stored fields plus its status at listing time.
#[derive(Serialize)]
struct TokenRow {
    id: String,
    token: String,
    interview_id: Option<String>,
    status: TokenStatus,
    expires_at: Option<String>,
}

impl TokenRow {
    fn new(token: AccessToken, now: chrono::DateTime<Utc>) -> Self {
        Self {
            status: token.status_at(now),
            expires_at: token.expires_at.map(|e| e.to_rfc3339()),
            id: token.id,
            token: token.value,
            interview_id: token.interview_id,
        }
    }
}

#[derive(Serialize)]
struct TokenListResponse {
    tokens: Vec<TokenRow>,
}

#[derive(Serialize)]
struct RevokedResponse<'a> {
    revoked: &'a str,
}

/// Handle `ivr token`.
pub async fn handle(action: &TokenCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        TokenCommands::List { interview, status } => {
            let status: Option<TokenStatus> = parse_opt_enum(status.as_deref(), "status")?;
            let tokens = with_spinner(
                "Loading tokens...",
                ctx.api.list_tokens(interview.as_deref(), status),
            )
            .await?;
            let now = Utc::now();
            let tokens = apply_limit(tokens, flags.limit)
                .into_iter()
                .map(|t| TokenRow::new(t, now))
                .collect();
            output(&TokenListResponse { tokens }, flags.format)
        }
        TokenCommands::Generate {
            interview_id,
            count,
            expires_in_days,
        } => {
            let request = TokenRequest {
                count: *count,
                expires_in_days: *expires_in_days,
            };
            let created = ctx.api.generate_tokens(interview_id, &request).await?;
            tracing::info!(interview = %interview_id, count = created.len(), "tokens generated");
            let now = Utc::now();
            let tokens = created.into_iter().map(|t| TokenRow::new(t, now)).collect();
            output(&TokenListResponse { tokens }, flags.format)
        }
        TokenCommands::Revoke { id } => {
            ctx.api.revoke_token(id).await?;
            output(&RevokedResponse { revoked: id }, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn row_carries_derived_status() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let token = AccessToken {
            id: "t1".into(),
            value: "ABC123".into(),
            interview_id: Some("int-1".into()),
            expires_at: Some(now - Duration::hours(1)),
            used: false,
            created_at: None,
        };
        let row = TokenRow::new(token, now);
        assert_eq!(row.status, TokenStatus::Expired);
        assert_eq!(row.token, "ABC123");
    }
}
