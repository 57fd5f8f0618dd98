//! Shared test doubles: a scriptable media host, playback sink, and a
//! recording delegate, plus a ledger tracking resource release.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use loopmix_core::{
    AudioGraph, DisplayRequest, DisplaySource, EncoderCallback, EncoderEvent, FinalizedRecording,
    GraphState, InputDevice, LoopController, MediaEncoder, MediaHost, MediaStream, ReadyState,
    RecordingInfo, SessionConfig, SessionDelegate, SessionError, SessionPhase, StatusKind,
    StatusReporter, TrackInfo, TrackKind, TrackObserver,
};

/// Records which resources were acquired and released across a session.
#[derive(Clone, Default)]
pub struct Ledger {
    inner: Arc<Mutex<LedgerState>>,
}

#[derive(Default)]
struct LedgerState {
    stopped_streams: Vec<String>,
    closed_graphs: usize,
    mic_acquisitions: usize,
    display_requests: Vec<DisplayRequest>,
    encoder_stops: usize,
}

impl Ledger {
    pub fn stopped_streams(&self) -> Vec<String> {
        self.inner.lock().stopped_streams.clone()
    }

    pub fn closed_graphs(&self) -> usize {
        self.inner.lock().closed_graphs
    }

    pub fn mic_acquisitions(&self) -> usize {
        self.inner.lock().mic_acquisitions
    }

    pub fn display_requests(&self) -> Vec<DisplayRequest> {
        self.inner.lock().display_requests.clone()
    }

    pub fn encoder_stops(&self) -> usize {
        self.inner.lock().encoder_stops
    }
}

pub fn audio_track(id: &str, muted: bool, ready_state: ReadyState) -> TrackInfo {
    TrackInfo {
        id: id.into(),
        kind: TrackKind::Audio,
        label: format!("{id} label"),
        enabled: true,
        muted,
        ready_state,
        settings: json!({"sampleRate": 48000, "channelCount": 2}),
    }
}

fn video_track(id: &str) -> TrackInfo {
    TrackInfo {
        id: id.into(),
        kind: TrackKind::Video,
        label: format!("{id} label"),
        enabled: true,
        muted: false,
        ready_state: ReadyState::Live,
        settings: json!({"frameRate": 30}),
    }
}

pub struct MockStream {
    id: String,
    audio: Vec<TrackInfo>,
    video: Vec<TrackInfo>,
    ledger: Ledger,
    stopped: bool,
}

impl MockStream {
    fn new(id: &str, audio: Vec<TrackInfo>, video: Vec<TrackInfo>, ledger: Ledger) -> Self {
        Self {
            id: id.into(),
            audio,
            video,
            ledger,
            stopped: false,
        }
    }
}

impl MediaStream for MockStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn audio_tracks(&self) -> Vec<TrackInfo> {
        self.audio.clone()
    }

    fn video_tracks(&self) -> Vec<TrackInfo> {
        self.video.clone()
    }

    fn observe(&self, _observer: TrackObserver) {}

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.ledger.inner.lock().stopped_streams.push(self.id.clone());
        }
    }
}

struct MockGraph {
    sample_rate: u32,
    state: GraphState,
    ledger: Ledger,
}

impl AudioGraph for MockGraph {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn state(&self) -> GraphState {
        self.state
    }

    fn resume(&mut self) -> Result<(), SessionError> {
        self.state = GraphState::Running;
        Ok(())
    }

    fn connect_source(&mut self, _stream: &dyn MediaStream) -> Result<(), SessionError> {
        Ok(())
    }

    fn mixed_stream(&mut self) -> Result<Box<dyn MediaStream>, SessionError> {
        Ok(Box::new(MockStream::new(
            "mixed-stream",
            vec![audio_track("mixed-audio", false, ReadyState::Live)],
            vec![],
            self.ledger.clone(),
        )))
    }

    fn close(&mut self) {
        if self.state != GraphState::Closed {
            self.state = GraphState::Closed;
            self.ledger.inner.lock().closed_graphs += 1;
        }
    }
}

struct MockEncoder {
    mime: String,
    flush_chunks: Vec<Vec<u8>>,
    callback: Option<EncoderCallback>,
    ledger: Ledger,
}

impl MediaEncoder for MockEncoder {
    fn mime_type(&self) -> &str {
        &self.mime
    }

    fn start(&mut self, callback: EncoderCallback) -> Result<(), SessionError> {
        self.callback = Some(callback);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SessionError> {
        self.ledger.inner.lock().encoder_stops += 1;
        let chunks = std::mem::take(&mut self.flush_chunks);
        if let Some(callback) = self.callback.clone() {
            for chunk in chunks {
                callback(EncoderEvent::Chunk(chunk));
            }
            callback(EncoderEvent::Stopped);
        }
        Ok(())
    }
}

/// Host behavior knobs. Defaults model a host that rejects audio-only
/// display capture but succeeds with video enabled.
pub struct HostBehavior {
    pub mic_error: Option<SessionError>,
    pub audio_only_display: bool,
    pub display_error: Option<SessionError>,
    pub display_audio_track: Option<TrackInfo>,
    pub supported_mime: bool,
    pub sources: Vec<DisplaySource>,
    pub flush_chunks: Vec<Vec<u8>>,
}

impl Default for HostBehavior {
    fn default() -> Self {
        Self {
            mic_error: None,
            audio_only_display: false,
            display_error: None,
            display_audio_track: Some(audio_track("sys-audio", false, ReadyState::Live)),
            supported_mime: true,
            sources: vec![DisplaySource {
                id: "screen:0".into(),
                name: "Screen 1".into(),
            }],
            flush_chunks: vec![vec![1, 2, 3], vec![4, 5]],
        }
    }
}

pub struct MockHost {
    behavior: HostBehavior,
    ledger: Ledger,
}

impl MockHost {
    pub fn new(behavior: HostBehavior, ledger: Ledger) -> Self {
        Self { behavior, ledger }
    }
}

impl MediaHost for MockHost {
    fn enumerate_inputs(&self) -> Result<Vec<InputDevice>, SessionError> {
        Ok(vec![
            InputDevice {
                id: "mic-0".into(),
                label: "USB Mic".into(),
                is_default: true,
            },
            InputDevice {
                id: "mic-1".into(),
                label: String::new(),
                is_default: false,
            },
        ])
    }

    fn acquire_microphone(
        &self,
        _device_id: Option<&str>,
    ) -> Result<Box<dyn MediaStream>, SessionError> {
        self.ledger.inner.lock().mic_acquisitions += 1;
        if let Some(error) = &self.behavior.mic_error {
            return Err(error.clone());
        }
        Ok(Box::new(MockStream::new(
            "mic-stream",
            vec![audio_track("mic-audio", false, ReadyState::Live)],
            vec![],
            self.ledger.clone(),
        )))
    }

    fn display_sources(&self) -> Result<Vec<DisplaySource>, SessionError> {
        Ok(self.behavior.sources.clone())
    }

    fn acquire_display(
        &self,
        request: &DisplayRequest,
    ) -> Result<Box<dyn MediaStream>, SessionError> {
        self.ledger.inner.lock().display_requests.push(request.clone());
        if let Some(error) = &self.behavior.display_error {
            return Err(error.clone());
        }
        if !request.video && !self.behavior.audio_only_display {
            return Err(SessionError::Unknown(
                "audio-only display capture not supported".into(),
            ));
        }
        let audio = self.behavior.display_audio_track.clone().into_iter().collect();
        let video = if request.video {
            vec![video_track("sys-video")]
        } else {
            vec![]
        };
        Ok(Box::new(MockStream::new(
            "display-stream",
            audio,
            video,
            self.ledger.clone(),
        )))
    }

    fn create_graph(&self, sample_rate: u32) -> Result<Box<dyn AudioGraph>, SessionError> {
        Ok(Box::new(MockGraph {
            sample_rate,
            state: GraphState::Suspended,
            ledger: self.ledger.clone(),
        }))
    }

    fn supports_mime(&self, _mime_type: &str) -> bool {
        self.behavior.supported_mime
    }

    fn create_encoder(
        &self,
        _stream: &dyn MediaStream,
        mime_type: &str,
    ) -> Result<Box<dyn MediaEncoder>, SessionError> {
        Ok(Box::new(MockEncoder {
            mime: mime_type.to_string(),
            flush_chunks: self.behavior.flush_chunks.clone(),
            callback: None,
            ledger: self.ledger.clone(),
        }))
    }
}

/// Observable state of the playback sink, shared with the test.
#[derive(Clone, Default)]
pub struct SinkProbe {
    inner: Arc<Mutex<SinkState>>,
}

#[derive(Default)]
struct SinkState {
    loaded: Option<FinalizedRecording>,
    looping: bool,
    playing: bool,
    play_calls: usize,
    pause_calls: usize,
    block_autoplay: bool,
}

impl SinkProbe {
    pub fn loaded(&self) -> Option<FinalizedRecording> {
        self.inner.lock().loaded.clone()
    }

    pub fn looping(&self) -> bool {
        self.inner.lock().looping
    }

    pub fn playing(&self) -> bool {
        self.inner.lock().playing
    }

    pub fn play_calls(&self) -> usize {
        self.inner.lock().play_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.inner.lock().pause_calls
    }
}

pub struct MockSink {
    probe: SinkProbe,
}

impl MockSink {
    pub fn new(block_autoplay: bool) -> (Self, SinkProbe) {
        let probe = SinkProbe::default();
        probe.inner.lock().block_autoplay = block_autoplay;
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl loopmix_core::PlaybackSink for MockSink {
    fn load(&mut self, recording: FinalizedRecording) {
        self.probe.inner.lock().loaded = Some(recording);
    }

    fn set_looping(&mut self, looping: bool) {
        self.probe.inner.lock().looping = looping;
    }

    fn play(&mut self) -> Result<(), SessionError> {
        let mut state = self.probe.inner.lock();
        state.play_calls += 1;
        if state.block_autoplay {
            return Err(SessionError::AutoplayBlocked(
                "user gesture required".into(),
            ));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.probe.inner.lock();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.probe.inner.lock().playing
    }
}

/// Delegate that records every notification.
#[derive(Default)]
pub struct PhaseLog {
    pub phases: Mutex<Vec<SessionPhase>>,
    pub statuses: Mutex<Vec<(StatusKind, String, bool)>>,
    pub lines: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<SessionError>>,
    pub finalized: Mutex<Vec<RecordingInfo>>,
}

impl PhaseLog {
    pub fn has_line_containing(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl SessionDelegate for PhaseLog {
    fn on_phase_changed(&self, phase: &SessionPhase) {
        self.phases.lock().push(phase.clone());
    }

    fn on_status_changed(&self, kind: StatusKind, text: &str, connected: bool) {
        self.statuses.lock().push((kind, text.to_string(), connected));
    }

    fn on_log(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    fn on_recording_finalized(&self, recording: &FinalizedRecording) {
        self.finalized.lock().push(recording.info());
    }

    fn on_error(&self, error: &SessionError) {
        self.errors.lock().push(error.clone());
    }
}

pub struct Harness {
    pub controller: LoopController<MockHost, MockSink>,
    pub ledger: Ledger,
    pub sink: SinkProbe,
    pub delegate: Arc<PhaseLog>,
}

pub fn harness(behavior: HostBehavior, block_autoplay: bool, recording_ms: u64) -> Harness {
    let ledger = Ledger::default();
    let host = MockHost::new(behavior, ledger.clone());
    let (sink, probe) = MockSink::new(block_autoplay);
    let delegate = Arc::new(PhaseLog::default());
    let as_dyn: Arc<dyn SessionDelegate> = delegate.clone();
    let reporter = StatusReporter::new(None, Some(as_dyn));
    let config = SessionConfig {
        recording_ms,
        ..SessionConfig::default()
    };
    let controller = LoopController::new(host, sink, config, reporter)
        .unwrap_or_else(|error| panic!("controller config rejected: {error}"));
    Harness {
        controller,
        ledger,
        sink: probe,
        delegate,
    }
}
