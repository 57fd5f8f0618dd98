//! Simulated media host: devices, display capture, graph, and encoder.

use serde_json::json;
use uuid::Uuid;

use loopmix_core::{
    AudioGraph, DisplayRequest, DisplaySource, InputDevice, MediaEncoder, MediaHost, MediaStream,
    ReadyState, SessionError, TrackInfo, TrackKind,
};

use crate::encoder::SimEncoder;
use crate::graph::SimGraph;
use crate::stream::{SimStream, StreamCounters};

/// Deterministic in-process host.
///
/// Models the awkward parts of real hosts: audio-only display capture is
/// rejected by default, forcing the video-enabled fallback.
pub struct SimHost {
    inputs: Vec<InputDevice>,
    sources: Vec<DisplaySource>,
    audio_only_display: bool,
    supported_mimes: Vec<String>,
    counters: StreamCounters,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            inputs: vec![
                InputDevice {
                    id: "sim-mic-0".into(),
                    label: "Simulated Microphone".into(),
                    is_default: true,
                },
                InputDevice {
                    id: "sim-mic-1".into(),
                    label: "Simulated Headset".into(),
                    is_default: false,
                },
            ],
            sources: vec![DisplaySource {
                id: "sim-screen-0".into(),
                name: "Entire Screen".into(),
            }],
            audio_only_display: false,
            supported_mimes: vec!["audio/webm;codecs=opus".into()],
            counters: StreamCounters::default(),
        }
    }

    /// Let audio-only display requests succeed instead of forcing the
    /// video-enabled fallback.
    pub fn with_audio_only_display(mut self, enabled: bool) -> Self {
        self.audio_only_display = enabled;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<InputDevice>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_sources(mut self, sources: Vec<DisplaySource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_supported_mimes(mut self, mimes: Vec<String>) -> Self {
        self.supported_mimes = mimes;
        self
    }

    /// Number of acquired streams not yet stopped.
    pub fn live_streams(&self) -> usize {
        self.counters.live_streams()
    }

    fn audio_track(&self, label: &str, sample_rate: u32) -> TrackInfo {
        TrackInfo {
            id: format!("track-{}", Uuid::new_v4()),
            kind: TrackKind::Audio,
            label: label.into(),
            enabled: true,
            muted: false,
            ready_state: ReadyState::Live,
            settings: json!({"sampleRate": sample_rate, "channelCount": 2}),
        }
    }

    fn video_track(&self, label: &str) -> TrackInfo {
        TrackInfo {
            id: format!("track-{}", Uuid::new_v4()),
            kind: TrackKind::Video,
            label: label.into(),
            enabled: true,
            muted: false,
            ready_state: ReadyState::Live,
            settings: json!({"frameRate": 30}),
        }
    }
}

impl MediaHost for SimHost {
    fn enumerate_inputs(&self) -> Result<Vec<InputDevice>, SessionError> {
        Ok(self.inputs.clone())
    }

    fn acquire_microphone(
        &self,
        device_id: Option<&str>,
    ) -> Result<Box<dyn MediaStream>, SessionError> {
        let device = match device_id {
            Some(id) => self
                .inputs
                .iter()
                .find(|d| d.id == id)
                .ok_or_else(|| SessionError::DeviceUnavailable(format!("no input device {id}")))?,
            None => self
                .inputs
                .iter()
                .find(|d| d.is_default)
                .or_else(|| self.inputs.first())
                .ok_or_else(|| {
                    SessionError::DeviceUnavailable("no input devices present".into())
                })?,
        };
        Ok(Box::new(SimStream::new(
            format!("sim-mic-stream-{}", Uuid::new_v4()),
            vec![self.audio_track(&device.label, 48_000)],
            self.counters.clone(),
        )))
    }

    fn display_sources(&self) -> Result<Vec<DisplaySource>, SessionError> {
        Ok(self.sources.clone())
    }

    fn acquire_display(
        &self,
        request: &DisplayRequest,
    ) -> Result<Box<dyn MediaStream>, SessionError> {
        let source = self
            .sources
            .iter()
            .find(|s| s.id == request.source_id)
            .ok_or_else(|| {
                SessionError::LoopbackUnavailable(format!(
                    "no display source {}",
                    request.source_id
                ))
            })?;
        if !request.audio {
            return Err(SessionError::LoopbackUnavailable(
                "display capture requested without audio".into(),
            ));
        }
        if !request.video && !self.audio_only_display {
            return Err(SessionError::LoopbackUnavailable(
                "audio-only display capture is not supported".into(),
            ));
        }

        let mut tracks = vec![self.audio_track("System Audio", 48_000)];
        if request.video {
            tracks.push(self.video_track(&source.name));
        }
        Ok(Box::new(SimStream::new(
            format!("sim-display-stream-{}", Uuid::new_v4()),
            tracks,
            self.counters.clone(),
        )))
    }

    fn create_graph(&self, sample_rate: u32) -> Result<Box<dyn AudioGraph>, SessionError> {
        Ok(Box::new(SimGraph::new(sample_rate, self.counters.clone())))
    }

    fn supports_mime(&self, mime_type: &str) -> bool {
        self.supported_mimes.iter().any(|m| m == mime_type)
    }

    fn create_encoder(
        &self,
        stream: &dyn MediaStream,
        mime_type: &str,
    ) -> Result<Box<dyn MediaEncoder>, SessionError> {
        if !self.supports_mime(mime_type) {
            return Err(SessionError::UnsupportedFormat(mime_type.to_string()));
        }
        let sample_rate = stream
            .audio_tracks()
            .first()
            .and_then(|t| t.settings.get("sampleRate"))
            .and_then(|v| v.as_u64())
            .unwrap_or(48_000) as u32;
        Ok(Box::new(SimEncoder::new(mime_type, sample_rate)))
    }
}
