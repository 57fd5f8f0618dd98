//! Capture-record-loop session lifecycle controller.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::capture::recorder::ChunkRecorder;
use crate::capture::{acquire, devices, mixer};
use crate::models::config::SessionConfig;
use crate::models::error::SessionError;
use crate::models::media::InputDevice;
use crate::models::recording::FinalizedRecording;
use crate::models::state::{SessionPhase, StatusKind, StatusView};
use crate::report::StatusReporter;
use crate::traits::bridge::PermissionProbe;
use crate::traits::media_host::{AudioGraph, MediaHost, MediaStream};
use crate::traits::playback::PlaybackSink;

/// One in-flight session's owned resources. Exactly one exists at a time;
/// every exit path releases all of it.
struct ActiveSession {
    serial: u64,
    mic: Box<dyn MediaStream>,
    display: Box<dyn MediaStream>,
    mixed: Box<dyn MediaStream>,
    graph: Box<dyn AudioGraph>,
    recorder: ChunkRecorder,
}

struct Shared {
    phase: SessionPhase,
    serial: u64,
    active: Option<ActiveSession>,
    status: StatusView,
    last_recording: Option<FinalizedRecording>,
}

impl Shared {
    fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            serial: 0,
            active: None,
            status: StatusView::default(),
            last_recording: None,
        }
    }
}

/// Orchestrates acquisition, mixing, recording, and loop playback while
/// enforcing the single-active-session invariant and unconditional resource
/// release on every exit path.
///
/// Cheaply cloneable; clones share the same session state.
pub struct LoopController<H: MediaHost, S: PlaybackSink> {
    inner: Arc<ControllerInner<H, S>>,
}

impl<H: MediaHost, S: PlaybackSink> Clone for LoopController<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<H, S> {
    host: H,
    sink: Mutex<S>,
    config: SessionConfig,
    reporter: StatusReporter,
    probe: Mutex<Option<Arc<dyn PermissionProbe>>>,
    shared: Mutex<Shared>,
}

impl<H, S> LoopController<H, S>
where
    H: MediaHost + 'static,
    S: PlaybackSink + 'static,
{
    pub fn new(
        host: H,
        sink: S,
        config: SessionConfig,
        reporter: StatusReporter,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;
        Ok(Self {
            inner: Arc::new(ControllerInner {
                host,
                sink: Mutex::new(sink),
                config,
                reporter,
                probe: Mutex::new(None),
                shared: Mutex::new(Shared::new()),
            }),
        })
    }

    /// Attach a permission probe. Statuses are logged at session start,
    /// diagnostics only.
    pub fn set_permission_probe(&self, probe: Arc<dyn PermissionProbe>) {
        *self.inner.probe.lock() = Some(probe);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.inner.shared.lock().phase.clone()
    }

    /// Latest capture/playback status slots.
    pub fn status_view(&self) -> StatusView {
        self.inner.shared.lock().status.clone()
    }

    /// The most recent finalized recording, if one was kept. Canceled
    /// sessions discard theirs.
    pub fn last_recording(&self) -> Option<FinalizedRecording> {
        self.inner.shared.lock().last_recording.clone()
    }

    /// Selectable microphones reported by the host.
    pub fn microphones(&self) -> Result<Vec<InputDevice>, SessionError> {
        devices::list_microphones(&self.inner.host)
    }

    /// Start a capture-record-loop session.
    ///
    /// No-op while a session is active. From `Looping`, the armed loop is
    /// paused and a fresh session starts. Any acquisition or format failure
    /// releases every partially acquired resource, reports `Failed`, and
    /// returns the controller to `Idle`.
    pub fn start(&self) -> Result<(), SessionError> {
        let inner = &self.inner;

        let serial = {
            let mut shared = inner.shared.lock();
            let phase = shared.phase.clone();
            match phase {
                SessionPhase::Idle => {}
                SessionPhase::Looping => {
                    drop(shared);
                    inner.sink.lock().pause();
                    shared = inner.shared.lock();
                }
                _ => {
                    inner
                        .reporter
                        .log("Start ignored: session already in progress.");
                    return Ok(());
                }
            }
            shared.serial += 1;
            shared.last_recording = None;
            shared.serial
        };

        inner.set_phase(SessionPhase::Acquiring);
        inner.set_status(
            StatusKind::Capture,
            &format!(
                "Capture: Recording {}s...",
                inner.config.recording_ms as f64 / 1000.0
            ),
            true,
        );
        inner.set_status(StatusKind::Playback, "Playback: Waiting for recording", false);

        let probe = inner.probe.lock().clone();
        if let Some(probe) = probe {
            inner.reporter.permission_snapshot(probe.as_ref());
        }

        match ControllerInner::run_session(&self.inner, serial) {
            Ok(()) => Ok(()),
            Err(error) => {
                inner.fail_session(error.clone());
                Err(error)
            }
        }
    }

    /// Stop the active session and/or the armed loop. Idempotent: a second
    /// stop with nothing left to stop is a logged no-op.
    pub fn stop(&self) {
        let inner = &self.inner;
        let (serial, has_active, phase) = {
            let shared = inner.shared.lock();
            (shared.serial, shared.active.is_some(), shared.phase.clone())
        };

        if phase.is_idle() && !has_active {
            inner.reporter.log("Stop ignored: nothing to stop.");
            return;
        }

        if has_active {
            inner.finalize(serial, true);
        }

        inner.sink.lock().pause();

        inner.set_status(StatusKind::Capture, "Capture: Idle", false);
        inner.set_status(StatusKind::Playback, "Playback: Stopped", false);
        inner.set_phase(SessionPhase::Idle);
        inner.reporter.log("Loop stopped.");
    }
}

impl<H, S> ControllerInner<H, S>
where
    H: MediaHost + 'static,
    S: PlaybackSink + 'static,
{
    /// Acquire both streams, mix, negotiate the format, and start the
    /// recorder. On any failure every partially acquired resource is
    /// released before the error propagates.
    fn run_session(inner: &Arc<Self>, serial: u64) -> Result<(), SessionError> {
        let reporter = &inner.reporter;
        let config = &inner.config;

        let mut mic = acquire::microphone(&inner.host, reporter, config.mic_device_id.as_deref())?;

        let mut display =
            match acquire::system_audio(&inner.host, reporter, &config.source_selector) {
                Ok(stream) => stream,
                Err(error) => {
                    mic.stop();
                    return Err(error);
                }
            };

        let output = match mixer::mix_streams(
            &inner.host,
            reporter,
            config.sample_rate,
            mic.as_ref(),
            display.as_ref(),
        ) {
            Ok(output) => output,
            Err(error) => {
                mic.stop();
                display.stop();
                return Err(error);
            }
        };
        let mixer::MixedOutput {
            mut graph,
            stream: mut mixed,
        } = output;

        // Format negotiation fails fast; no silent fallback.
        if !inner.host.supports_mime(&config.mime_type) {
            mixed.stop();
            graph.close();
            mic.stop();
            display.stop();
            return Err(SessionError::UnsupportedFormat(config.mime_type.clone()));
        }
        reporter.log(format!("Encoder mime type selected: {}", config.mime_type));

        let encoder = match inner.host.create_encoder(mixed.as_ref(), &config.mime_type) {
            Ok(encoder) => encoder,
            Err(error) => {
                mixed.stop();
                graph.close();
                mic.stop();
                display.stop();
                return Err(error);
            }
        };
        reporter.log(format!(
            "Encoder negotiated mime type: {}",
            encoder.mime_type()
        ));

        let mut recorder = ChunkRecorder::new(
            encoder,
            Duration::from_millis(config.recording_ms),
            reporter.clone(),
        );
        let window_secs = config.recording_ms as f64 / 1000.0;
        let elapsed_inner = Arc::clone(inner);
        let on_elapsed = Box::new(move || {
            elapsed_inner
                .reporter
                .log(format!("Recording stopped after {window_secs}s."));
            elapsed_inner.finalize(serial, false);
        });
        if let Err(error) = recorder.start(on_elapsed) {
            mixed.stop();
            graph.close();
            mic.stop();
            display.stop();
            return Err(error);
        }

        {
            let mut shared = inner.shared.lock();
            if shared.serial != serial || !matches!(shared.phase, SessionPhase::Acquiring) {
                // Canceled while acquiring: release immediately.
                drop(shared);
                if let Err(error) = recorder.cancel() {
                    reporter.log(format!("Recorder cancel failed: {error}"));
                }
                mixed.stop();
                graph.close();
                mic.stop();
                display.stop();
                reporter.log("Session canceled during acquisition.");
                return Ok(());
            }
            shared.active = Some(ActiveSession {
                serial,
                mic,
                display,
                mixed,
                graph,
                recorder,
            });
        }
        inner.set_phase(SessionPhase::Recording);
        Ok(())
    }

    /// Stop the recorder, release every session resource, then either arm
    /// loop playback or discard the blob.
    ///
    /// Not re-entrant: a second caller (stale deadline, or a stop issued
    /// after the timer already fired) finds no matching active session and
    /// returns without effect.
    fn finalize(&self, serial: u64, suppress_playback: bool) {
        let mut session = {
            let mut shared = self.shared.lock();
            match shared.active.take() {
                Some(active) if active.serial == serial => {
                    shared.phase = SessionPhase::Finalizing;
                    active
                }
                Some(active) => {
                    shared.active = Some(active);
                    return;
                }
                None => return,
            }
        };
        self.reporter.phase(&SessionPhase::Finalizing);

        let recording = if suppress_playback {
            if let Err(error) = session.recorder.cancel() {
                self.reporter.log(format!("Recorder cancel failed: {error}"));
            }
            None
        } else {
            match session.recorder.stop() {
                Ok(recording) => Some(recording),
                Err(error) => {
                    self.reporter.log(format!("Recorder stop failed: {error}"));
                    None
                }
            }
        };

        // Release is unconditional on every exit path.
        session.graph.close();
        session.mixed.stop();
        session.mic.stop();
        session.display.stop();
        self.reporter.log("Session streams released.");

        match recording {
            Some(recording) => {
                self.reporter.log(format!(
                    "Recorder stopped. chunks={}, blob.size={}, blob.type={}",
                    recording.chunk_count,
                    recording.size(),
                    recording.mime_type
                ));
                self.reporter.finalized(&recording);

                {
                    let mut sink = self.sink.lock();
                    sink.load(recording.clone());
                    sink.set_looping(true);
                    match sink.play() {
                        Ok(()) => self
                            .reporter
                            .log("Recording complete. Starting loop playback."),
                        Err(SessionError::AutoplayBlocked(message)) => {
                            // Non-fatal: the loop stays armed for a manual start.
                            self.reporter.log(format!(
                                "Autoplay blocked: {message}. Start playback manually."
                            ));
                        }
                        Err(error) => self
                            .reporter
                            .log(format!("Loop playback failed to start: {error}")),
                    }
                }

                self.shared.lock().last_recording = Some(recording);
                self.set_status(StatusKind::Capture, "Capture: Complete", true);
                self.set_status(StatusKind::Playback, "Playback: Looping", true);
                self.set_phase(SessionPhase::Looping);
            }
            None => {
                self.reporter.log("Recording canceled.");
                self.set_phase(SessionPhase::Canceled);
                self.set_status(StatusKind::Capture, "Capture: Idle", false);
                self.set_status(StatusKind::Playback, "Playback: Stopped", false);
                self.set_phase(SessionPhase::Idle);
            }
        }
    }

    fn fail_session(&self, error: SessionError) {
        self.reporter.log(format!("Failed to record: {error}"));
        log::error!(target: "loopmix", "session failed: {error}");
        self.reporter.error(&error);
        self.set_phase(SessionPhase::Failed(error));
        self.set_status(StatusKind::Capture, "Capture: Error", false);
        self.set_status(StatusKind::Playback, "Playback: Stopped", false);
        self.set_phase(SessionPhase::Idle);
    }

    fn set_phase(&self, phase: SessionPhase) {
        self.shared.lock().phase = phase.clone();
        self.reporter.phase(&phase);
    }

    fn set_status(&self, kind: StatusKind, text: &str, connected: bool) {
        {
            let mut shared = self.shared.lock();
            let slot = match kind {
                StatusKind::Capture => &mut shared.status.capture,
                StatusKind::Playback => &mut shared.status.playback,
            };
            slot.text = text.to_string();
            slot.connected = connected;
        }
        self.reporter.status(kind, text, connected);
    }
}
