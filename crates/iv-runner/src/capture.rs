//! Camera + microphone capture.
//!
//! The runner only talks to [`MediaCapture`]. [`CommandCapture`] records by
//! running an external encoder (e.g. `ffmpeg`) that writes the stream to
//! stdout; [`MemoryCapture`] fabricates chunks for `--simulate` and tests.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use iv_config::CaptureConfig;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture program configured (set capture.program)")]
    NotConfigured,

    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    #[error("capture is not recording")]
    NotRecording,

    #[error("capture is already recording")]
    AlreadyRecording,

    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A media stream that is acquired once, recorded in segments and released
/// at the end of the interview.
#[async_trait]
pub trait MediaCapture: Send {
    /// Acquire (or reuse) the camera and microphone.
    async fn acquire(&mut self) -> Result<(), CaptureError>;

    /// Toggle the video track without releasing it.
    fn set_video_enabled(&mut self, enabled: bool);

    /// Begin a capture session; chunks accumulate until [`Self::stop`].
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// Ask the encoder to emit whatever it has buffered.
    async fn request_data(&mut self) -> Result<(), CaptureError>;

    /// End the capture session and hand back its chunks in arrival order.
    async fn stop(&mut self) -> Result<Vec<Vec<u8>>, CaptureError>;

    fn mime_type(&self) -> &str;

    /// Release every track. Safe to call more than once.
    async fn release(&mut self);
}

// --- external command ---

/// Records by spawning the configured program once per answer.
#[derive(Debug)]
pub struct CommandCapture {
    config: CaptureConfig,
    acquired: bool,
    video_enabled: bool,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    /// A clean exit has been requested for the running child.
    finishing: bool,
    reader: Option<JoinHandle<Vec<Vec<u8>>>>,
}

const READ_CHUNK: usize = 64 * 1024;

impl CommandCapture {
    #[must_use]
    pub const fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            acquired: false,
            video_enabled: true,
            child: None,
            stdin: None,
            finishing: false,
            reader: None,
        }
    }

    /// Ask the running program to flush and exit: the configured stop input
    /// on stdin, otherwise SIGTERM. Sent at most once per recording.
    async fn request_finish(&mut self) -> Result<(), CaptureError> {
        if self.finishing {
            return Ok(());
        }
        let pid = self.child.as_ref().ok_or(CaptureError::NotRecording)?.id();
        self.finishing = true;

        if let (Some(mut stdin), Some(input)) = (self.stdin.take(), self.config.stop_input.as_deref()) {
            stdin.write_all(input.as_bytes()).await?;
            stdin.flush().await?;
            // Dropping stdin closes it; encoders reading it see EOF too.
            return Ok(());
        }
        terminate(pid).await
    }

    fn resolve_program(&self) -> Option<PathBuf> {
        let program = PathBuf::from(&self.config.program);
        if program.components().count() > 1 {
            return program.is_file().then_some(program);
        }
        std::env::var_os("PATH").and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(&program))
                .find(|candidate| candidate.is_file())
        })
    }
}

#[async_trait]
impl MediaCapture for CommandCapture {
    async fn acquire(&mut self) -> Result<(), CaptureError> {
        if self.acquired {
            return Ok(());
        }
        if !self.config.is_configured() {
            return Err(CaptureError::NotConfigured);
        }
        let program = self.resolve_program().ok_or_else(|| {
            CaptureError::Unavailable(format!("'{}' not found on PATH", self.config.program))
        })?;
        tracing::debug!(program = %program.display(), "capture program resolved");
        self.acquired = true;
        Ok(())
    }

    fn set_video_enabled(&mut self, enabled: bool) {
        self.video_enabled = enabled;
    }

    async fn start(&mut self) -> Result<(), CaptureError> {
        if !self.acquired {
            return Err(CaptureError::Unavailable("capture not acquired".into()));
        }
        if self.child.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }
        let stdin = if self.config.stop_input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CaptureError::Unavailable("capture stdout not piped".into()))?;

        self.reader = Some(tokio::spawn(async move {
            let mut chunks = Vec::new();
            let mut buf = vec![0u8; READ_CHUNK];
            loop {
                match stdout.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => chunks.push(buf[..n].to_vec()),
                    Err(e) => {
                        tracing::warn!("capture stream read failed: {e}");
                        break;
                    }
                }
            }
            chunks
        }));
        self.stdin = child.stdin.take();
        self.finishing = false;
        self.child = Some(child);
        Ok(())
    }

    /// Encoders only emit their buffered tail when they finish, so the final
    /// chunk is requested by asking the program to exit cleanly.
    async fn request_data(&mut self) -> Result<(), CaptureError> {
        self.request_finish().await
    }

    async fn stop(&mut self) -> Result<Vec<Vec<u8>>, CaptureError> {
        if self.child.is_none() {
            return Err(CaptureError::NotRecording);
        }
        if let Err(e) = self.request_finish().await {
            tracing::debug!("clean capture stop request failed: {e}");
        }
        let mut child = self.child.take().ok_or(CaptureError::NotRecording)?;
        self.stdin = None;
        self.finishing = false;

        let timeout = Duration::from_millis(self.config.stop_timeout_ms);
        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.stop_timeout_ms,
                    "capture program did not exit in time; killing it"
                );
                if let Err(e) = child.start_kill() {
                    tracing::debug!("capture process already gone: {e}");
                }
                child.wait().await?
            }
        };
        tracing::debug!(%status, "capture process exited");
        let chunks = match self.reader.take() {
            Some(reader) => reader
                .await
                .map_err(|e| CaptureError::Unavailable(format!("capture reader failed: {e}")))?,
            None => Vec::new(),
        };
        Ok(chunks)
    }

    fn mime_type(&self) -> &str {
        &self.config.mime_type
    }

    async fn release(&mut self) {
        self.stdin = None;
        self.finishing = false;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill().await;
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.acquired = false;
    }
}

#[cfg(unix)]
async fn terminate(pid: Option<u32>) -> Result<(), CaptureError> {
    let Some(pid) = pid else {
        // Already reaped.
        return Ok(());
    };
    let status = Command::new("kill")
        .arg("-TERM")
        .arg(pid.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;
    if !status.success() {
        tracing::debug!(pid, %status, "SIGTERM not delivered; process may have exited");
    }
    Ok(())
}

#[cfg(not(unix))]
async fn terminate(_pid: Option<u32>) -> Result<(), CaptureError> {
    // No SIGTERM here; `stop` falls back to killing after the timeout.
    Ok(())
}

// --- in-memory ---

/// Observable state of a [`MemoryCapture`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCaptureState {
    pub acquired: bool,
    pub video_enabled: bool,
    pub recording: bool,
    pub sessions_started: u32,
    pub data_requests: u32,
    pub releases: u32,
}

/// Synthetic capture. Emits one chunk per data request and one on stop.
#[derive(Debug, Clone)]
pub struct MemoryCapture {
    mime_type: String,
    chunk: Vec<u8>,
    available: bool,
    pending: Vec<Vec<u8>>,
    state: Arc<Mutex<MemoryCaptureState>>,
}

impl MemoryCapture {
    #[must_use]
    pub fn new(mime_type: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            chunk: b"\x1a\x45\xdf\xa3frame".to_vec(),
            available: true,
            pending: Vec::new(),
            state: Arc::default(),
        }
    }

    /// A capture that never emits data.
    #[must_use]
    pub fn silent(mime_type: &str) -> Self {
        Self {
            chunk: Vec::new(),
            ..Self::new(mime_type)
        }
    }

    /// A capture whose devices cannot be acquired.
    #[must_use]
    pub fn unavailable(mime_type: &str) -> Self {
        Self {
            available: false,
            ..Self::new(mime_type)
        }
    }

    /// Shared view of the capture's state, readable after the capture has
    /// been handed to a runner.
    #[must_use]
    pub fn probe(&self) -> Arc<Mutex<MemoryCaptureState>> {
        Arc::clone(&self.state)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryCaptureState) -> T) -> T {
        f(&mut self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn emit(&mut self) {
        if !self.chunk.is_empty() {
            self.pending.push(self.chunk.clone());
        }
    }
}

#[async_trait]
impl MediaCapture for MemoryCapture {
    async fn acquire(&mut self) -> Result<(), CaptureError> {
        if !self.available {
            return Err(CaptureError::Unavailable("permission denied".into()));
        }
        self.with_state(|s| {
            s.acquired = true;
            s.video_enabled = true;
        });
        Ok(())
    }

    fn set_video_enabled(&mut self, enabled: bool) {
        self.with_state(|s| s.video_enabled = enabled);
    }

    async fn start(&mut self) -> Result<(), CaptureError> {
        let acquired = self.with_state(|s| s.acquired);
        if !acquired {
            return Err(CaptureError::Unavailable("capture not acquired".into()));
        }
        if self.with_state(|s| s.recording) {
            return Err(CaptureError::AlreadyRecording);
        }
        self.pending.clear();
        self.with_state(|s| {
            s.recording = true;
            s.sessions_started += 1;
        });
        Ok(())
    }

    async fn request_data(&mut self) -> Result<(), CaptureError> {
        if !self.with_state(|s| s.recording) {
            return Err(CaptureError::NotRecording);
        }
        self.with_state(|s| s.data_requests += 1);
        self.emit();
        Ok(())
    }

    async fn stop(&mut self) -> Result<Vec<Vec<u8>>, CaptureError> {
        if !self.with_state(|s| s.recording) {
            return Err(CaptureError::NotRecording);
        }
        self.emit();
        self.with_state(|s| s.recording = false);
        Ok(std::mem::take(&mut self.pending))
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn release(&mut self) {
        self.pending.clear();
        self.with_state(|s| {
            s.acquired = false;
            s.video_enabled = false;
            s.recording = false;
            s.releases += 1;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_capture_segments() {
        let mut capture = MemoryCapture::new("video/webm");
        let probe = capture.probe();
        capture.acquire().await.unwrap();
        capture.start().await.unwrap();
        capture.request_data().await.unwrap();
        let chunks = capture.stop().await.unwrap();
        assert_eq!(chunks.len(), 2);

        capture.start().await.unwrap();
        assert_eq!(capture.stop().await.unwrap().len(), 1);

        capture.release().await;
        let state = probe.lock().unwrap().clone();
        assert_eq!(state.sessions_started, 2);
        assert_eq!(state.releases, 1);
        assert!(!state.acquired);
    }

    #[tokio::test]
    async fn stop_without_start_is_an_error() {
        let mut capture = MemoryCapture::new("video/webm");
        capture.acquire().await.unwrap();
        assert!(matches!(capture.stop().await, Err(CaptureError::NotRecording)));
    }

    #[tokio::test]
    async fn unconfigured_command_capture_cannot_acquire() {
        let mut capture = CommandCapture::new(CaptureConfig::default());
        assert!(matches!(
            capture.acquire().await,
            Err(CaptureError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let mut capture = CommandCapture::new(CaptureConfig {
            program: "definitely-not-a-capture-program-xyz".into(),
            ..Default::default()
        });
        assert!(matches!(
            capture.acquire().await,
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_capture_collects_stdout() {
        let mut capture = CommandCapture::new(CaptureConfig {
            program: "sh".into(),
            args: vec!["-c".into(), "printf recorded; exec sleep 5".into()],
            ..Default::default()
        });
        capture.acquire().await.unwrap();
        capture.start().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        let chunks = capture.stop().await.unwrap();
        assert_eq!(chunks.concat(), b"recorded");
        capture.release().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn final_chunk_is_flushed_on_terminate() {
        let mut capture = CommandCapture::new(CaptureConfig {
            program: "sh".into(),
            args: vec![
                "-c".into(),
                "trap 'printf tail; exit 0' TERM INT; printf head; while :; do sleep 0.05; done"
                    .into(),
            ],
            ..Default::default()
        });
        capture.acquire().await.unwrap();
        capture.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        capture.request_data().await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        let chunks = capture.stop().await.unwrap();
        assert_eq!(chunks.concat(), b"headtail");
        capture.release().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stop_input_ends_the_recording() {
        let mut capture = CommandCapture::new(CaptureConfig {
            program: "sh".into(),
            args: vec![
                "-c".into(),
                "printf head; read cmd; printf \"tail-$cmd\"".into(),
            ],
            stop_input: Some("q\n".into()),
            ..Default::default()
        });
        capture.acquire().await.unwrap();
        capture.start().await.unwrap();
        let chunks = capture.stop().await.unwrap();
        assert_eq!(chunks.concat(), b"headtail-q");
        capture.release().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stubborn_program_is_killed_after_timeout() {
        let mut capture = CommandCapture::new(CaptureConfig {
            program: "sh".into(),
            args: vec!["-c".into(), "trap '' TERM; printf head; while :; do sleep 0.05; done".into()],
            stop_timeout_ms: 200,
            ..Default::default()
        });
        capture.acquire().await.unwrap();
        capture.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        let chunks = capture.stop().await.unwrap();
        assert_eq!(chunks.concat(), b"head");
        capture.release().await;
    }
}
