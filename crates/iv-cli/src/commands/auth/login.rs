use serde::Serialize;

use iv_core::enums::UserRole;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    scope: &'static str,
    email: String,
    role: Option<UserRole>,
}

pub async fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = if args.admin {
        let login = with_spinner(
            "Signing in to the admin console...",
            ctx.admin.admin_login(&args.email, &args.password),
        )
        .await?;
        ctx.store.record_admin_login(&login.token)?;
        AuthLoginResponse {
            authenticated: true,
            scope: "admin",
            email: args.email.trim().to_string(),
            role: login.role.or(Some(UserRole::Admin)),
        }
    } else {
        let login = with_spinner("Signing in...", ctx.api.login(&args.email, &args.password)).await?;
        ctx.store.record_login(&login)?;
        AuthLoginResponse {
            authenticated: true,
            scope: "user",
            email: args.email.trim().to_string(),
            role: login.role,
        }
    };
    tracing::info!(scope = response.scope, "logged in");
    output(&response, flags.format)
}
