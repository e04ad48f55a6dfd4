use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLogoutArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: &'static str,
}

pub fn handle(args: &AuthLogoutArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cleared = if args.admin {
        ctx.store.clear_admin()?;
        "admin"
    } else {
        ctx.store.clear_all()?;
        "all"
    };
    output(&AuthLogoutResponse { cleared }, flags.format)
}
