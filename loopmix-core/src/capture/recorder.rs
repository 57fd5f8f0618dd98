//! Fixed-window chunk recorder over a host media encoder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::models::error::SessionError;
use crate::models::recording::FinalizedRecording;
use crate::models::state::RecorderState;
use crate::report::StatusReporter;
use crate::traits::encoder::{EncoderCallback, EncoderEvent, MediaEncoder};

/// Granularity at which the deadline thread re-checks cancellation.
const DEADLINE_SLICE: Duration = Duration::from_millis(10);

/// Records encoder chunks for a bounded window, then consolidates them into
/// one immutable blob tagged with the negotiated media type.
pub struct ChunkRecorder {
    encoder: Box<dyn MediaEncoder>,
    window: Duration,
    reporter: StatusReporter,
    state: Arc<Mutex<RecorderState>>,
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
    deadline_cancel: Arc<AtomicBool>,
    finalized: Option<FinalizedRecording>,
}

impl ChunkRecorder {
    pub fn new(
        encoder: Box<dyn MediaEncoder>,
        window: Duration,
        reporter: StatusReporter,
    ) -> Self {
        Self {
            encoder,
            window,
            reporter,
            state: Arc::new(Mutex::new(RecorderState::Idle)),
            chunks: Arc::new(Mutex::new(Vec::new())),
            deadline_cancel: Arc::new(AtomicBool::new(false)),
            finalized: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        *self.state.lock()
    }

    pub fn mime_type(&self) -> &str {
        self.encoder.mime_type()
    }

    /// Start the encoder and arm the window deadline.
    ///
    /// `on_elapsed` runs on the deadline thread when the window expires while
    /// the recorder is still recording. An explicit `stop`/`cancel` clears
    /// the deadline immediately, so a duplicate stop can never fire later.
    pub fn start(&mut self, on_elapsed: Box<dyn FnOnce() + Send>) -> Result<(), SessionError> {
        if *self.state.lock() != RecorderState::Idle {
            return Err(SessionError::EncoderFailure(
                "recorder already started".into(),
            ));
        }

        let callback = self.chunk_callback();
        self.encoder.start(callback)?;
        *self.state.lock() = RecorderState::Recording;
        self.reporter.log("Recording started.");

        let cancel = Arc::clone(&self.deadline_cancel);
        let state = Arc::clone(&self.state);
        let window = self.window;
        thread::Builder::new()
            .name("record-deadline".into())
            .spawn(move || {
                let deadline = Instant::now() + window;
                while Instant::now() < deadline {
                    if cancel.load(Ordering::SeqCst) {
                        return;
                    }
                    thread::sleep(DEADLINE_SLICE.min(window));
                }
                if cancel.load(Ordering::SeqCst) {
                    return;
                }
                if *state.lock() == RecorderState::Recording {
                    on_elapsed();
                }
            })
            .map_err(|e| SessionError::Unknown(format!("failed to spawn deadline thread: {e}")))?;
        Ok(())
    }

    fn chunk_callback(&self) -> EncoderCallback {
        let chunks = Arc::clone(&self.chunks);
        let reporter = self.reporter.clone();
        Arc::new(move |event| match event {
            EncoderEvent::Chunk(data) => {
                reporter.log(format!("Encoder chunk: {} bytes", data.len()));
                // Zero-size chunks are observed but not retained.
                if !data.is_empty() {
                    chunks.lock().push(data);
                }
            }
            EncoderEvent::Stopped => reporter.log("Encoder stopped."),
            // Runtime faults are logged only; the session still reaches a
            // stop through an explicit request.
            EncoderEvent::Error(message) => reporter.log(format!("Encoder error: {message}")),
        })
    }

    /// Stop, flush, and consolidate retained chunks in arrival order.
    /// Idempotent once finalized: returns the cached blob.
    pub fn stop(&mut self) -> Result<FinalizedRecording, SessionError> {
        match *self.state.lock() {
            RecorderState::Recording => {}
            RecorderState::Finalized => {
                return self.finalized.clone().ok_or_else(|| {
                    SessionError::EncoderFailure("finalized recording missing".into())
                });
            }
            other => {
                return Err(SessionError::EncoderFailure(format!(
                    "cannot stop recorder in state {other:?}"
                )));
            }
        }

        self.deadline_cancel.store(true, Ordering::SeqCst);
        *self.state.lock() = RecorderState::Stopping;
        self.encoder.stop()?;

        let chunks = std::mem::take(&mut *self.chunks.lock());
        let recording = FinalizedRecording::from_chunks(
            self.encoder.mime_type(),
            chunks,
            self.window.as_millis() as u64,
        );
        *self.state.lock() = RecorderState::Finalized;
        self.finalized = Some(recording.clone());
        Ok(recording)
    }

    /// Stop, flush, and discard every retained chunk. No-op unless recording.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if *self.state.lock() != RecorderState::Recording {
            return Ok(());
        }

        self.deadline_cancel.store(true, Ordering::SeqCst);
        *self.state.lock() = RecorderState::Stopping;
        self.encoder.stop()?;
        self.chunks.lock().clear();
        *self.state.lock() = RecorderState::Canceled;
        Ok(())
    }
}
