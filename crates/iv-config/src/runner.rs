//! Candidate interview runner timing.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

const fn default_practice_secs() -> u32 {
    10
}

const fn default_warning_threshold_secs() -> u32 {
    10
}

const fn default_flush_grace_ms() -> u64 {
    250
}

const fn default_tick_interval_ms() -> u64 {
    200
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Prepend a practice question that is never uploaded and may be re-recorded.
    #[serde(default = "default_true")]
    pub practice_question: bool,

    #[serde(default = "default_practice_secs")]
    pub practice_preparation_secs: u32,

    #[serde(default = "default_practice_secs")]
    pub practice_recording_secs: u32,

    /// The warning flag is raised during the last N seconds of preparation.
    #[serde(default = "default_warning_threshold_secs")]
    pub warning_threshold_secs: u32,

    /// Wait after requesting the final chunk on auto-stop.
    #[serde(default = "default_flush_grace_ms")]
    pub flush_grace_ms: u64,

    /// How often the driver polls the active countdown.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            practice_question: default_true(),
            practice_preparation_secs: default_practice_secs(),
            practice_recording_secs: default_practice_secs(),
            warning_threshold_secs: default_warning_threshold_secs(),
            flush_grace_ms: default_flush_grace_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RunnerConfig::default();
        assert!(config.practice_question);
        assert_eq!(config.practice_preparation_secs, 10);
        assert_eq!(config.practice_recording_secs, 10);
        assert_eq!(config.warning_threshold_secs, 10);
    }
}
