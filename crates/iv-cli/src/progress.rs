use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Optional spinner or countdown bar on stderr. A no-op when output is not
/// interactive.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Spinner shown while waiting on the backend.
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Bar that drains from `total_secs` to zero.
    #[must_use]
    pub fn countdown(total_secs: u64, message: &str) -> Self {
        if !ui::prefs().interactive {
            return Self { bar: None };
        }
        let bar = ProgressBar::new(total_secs.max(1));
        bar.set_style(
            ProgressStyle::with_template("{msg:<28} {wide_bar:.yellow/blue} {prefix:>4}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Show `remaining` seconds left of the bar's length.
    pub fn set_remaining(&self, remaining: u64) {
        if let Some(bar) = &self.bar {
            let total = bar.length().unwrap_or(remaining);
            bar.set_position(total.saturating_sub(remaining));
            bar.set_prefix(format!("{remaining}s"));
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Run `fut` under a spinner, clearing it afterwards.
pub async fn with_spinner<F, T, E>(message: &str, fut: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let spinner = Progress::spinner(message);
    let result = fut.await;
    match &result {
        Ok(_) => spinner.finish_clear(),
        Err(_) => spinner.finish_err(message),
    }
    result
}
