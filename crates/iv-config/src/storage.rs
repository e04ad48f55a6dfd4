//! Local session-file location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Override for the session file. Empty means `~/.intervue/session.json`.
    #[serde(default)]
    pub session_file: String,
}

impl StorageConfig {
    /// Resolve the session file path, or `None` if no home directory exists.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        if self.session_file.trim().is_empty() {
            dirs::home_dir().map(|h| h.join(".intervue").join("session.json"))
        } else {
            Some(PathBuf::from(&self.session_file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let config = StorageConfig {
            session_file: "/tmp/iv/session.json".into(),
        };
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/iv/session.json"))
        );
    }

    #[test]
    fn default_is_under_home() {
        if let Some(path) = StorageConfig::default().session_path() {
            assert!(path.ends_with(".intervue/session.json"));
        }
    }
}
