use serde::Serialize;
use serde_json::Value;

use iv_core::entities::{AdminSettings, AdminUser};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct UserListResponse {
    users: Vec<AdminUser>,
}

/// Handle `ivr admin`.
pub async fn handle(action: &AdminCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_admin()?;
    match action {
        AdminCommands::Settings => output(&ctx.admin.admin_settings().await?, flags.format),
        AdminCommands::Set { pairs } => {
            let changes = parse_settings(pairs)?;
            output(&ctx.admin.update_admin_settings(&changes).await?, flags.format)
        }
        AdminCommands::Users => {
            let users = with_spinner("Loading users...", ctx.admin.admin_users()).await?;
            let users = apply_limit(users, flags.limit);
            output(&UserListResponse { users }, flags.format)
        }
        AdminCommands::Health => {
            let health = ctx.admin.system_health().await?;
            if !health.is_healthy() {
                tracing::warn!(status = %health.status, "backend reports degraded health");
            }
            output(&health, flags.format)
        }
    }
}

/// `key=value` pairs into a settings patch. Values that parse as JSON keep
/// their type (`50`, `false`, `{"a":1}`); anything else is a string.
fn parse_settings(pairs: &[String]) -> anyhow::Result<AdminSettings> {
    let mut settings = AdminSettings::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            anyhow::bail!("invalid setting '{pair}': expected key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("invalid setting '{pair}': empty key");
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        settings.insert(key.to_string(), value);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::parse_settings;

    #[test]
    fn values_keep_json_types() {
        let settings = parse_settings(&[
            "maxTokens=50".to_string(),
            "maintenance=false".to_string(),
            "banner=Back soon".to_string(),
        ])
        .unwrap();
        assert_eq!(
            serde_json::Value::Object(settings),
            json!({ "maxTokens": 50, "maintenance": false, "banner": "Back soon" })
        );
    }

    #[test]
    fn rejects_pairs_without_equals() {
        let err = parse_settings(&["maintenance".to_string()]).unwrap_err();
        assert!(err.to_string().contains("expected key=value"));
        assert!(parse_settings(&["=1".to_string()]).is_err());
    }
}
