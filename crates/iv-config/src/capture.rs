//! External capture command settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_mime_type() -> String {
    "video/webm".into()
}

const fn default_stop_timeout_ms() -> u64 {
    2_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Program that writes the encoded camera+microphone stream to stdout,
    /// e.g. `ffmpeg`.
    #[serde(default)]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Written to the program's stdin to end a recording cleanly (`q` for
    /// ffmpeg). Without it the program is sent SIGTERM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_input: Option<String>,

    /// How long a stopping program may take to flush before it is killed.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            mime_type: default_mime_type(),
            stop_input: None,
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}

impl CaptureConfig {
    /// Whether a capture program has been set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.program.trim().is_empty()
    }

    /// Fail with a setup hint when no capture program is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for an empty `program`.
    pub fn ensure_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "capture",
                hint: "set capture.program (e.g. INTERVUE_CAPTURE__PROGRAM=ffmpeg) or pass --simulate",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = CaptureConfig::default();
        assert!(!config.is_configured());
        let err = config.ensure_configured().unwrap_err();
        assert!(err.to_string().starts_with("[capture] is not set up"));
    }

    #[test]
    fn configured_when_program_set() {
        let config = CaptureConfig {
            program: "ffmpeg".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
