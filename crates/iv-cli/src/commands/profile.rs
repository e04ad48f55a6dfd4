use serde::Serialize;

use iv_core::entities::{PasswordChange, ProfileUpdate};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PasswordChangedResponse {
    password_changed: bool,
}

/// Handle `ivr profile`.
pub async fn handle(
    action: &ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        ProfileCommands::Get => output(&ctx.api.profile().await?, flags.format),
        ProfileCommands::Update {
            name,
            email,
            company,
        } => {
            let update = ProfileUpdate {
                name: name.clone(),
                email: email.clone(),
                company: company.clone(),
            };
            if update == ProfileUpdate::default() {
                anyhow::bail!("nothing to update: pass --name, --email or --company");
            }
            output(&ctx.api.update_profile(&update).await?, flags.format)
        }
        ProfileCommands::Password { current, new } => {
            ctx.api
                .change_password(&PasswordChange {
                    current_password: current.clone(),
                    new_password: new.clone(),
                })
                .await?;
            output(
                &PasswordChangedResponse {
                    password_changed: true,
                },
                flags.format,
            )
        }
    }
}
