use std::path::PathBuf;

use anyhow::Context;

/// Load `.env` (nearest ancestor wins), then the layered config.
pub fn load_config() -> anyhow::Result<iv_config::IntervueConfig> {
    load_dotenv()?;
    iv_config::IntervueConfig::load().context("failed to load intervue configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    if let Some(env_path) = find_dotenv(&cwd) {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        tracing::debug!(path = %env_path.display(), "loaded dotenv");
    }
    Ok(())
}

fn find_dotenv(start: &std::path::Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}
