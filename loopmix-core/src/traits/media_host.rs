use std::sync::Arc;

use crate::models::error::SessionError;
use crate::models::media::{DisplayRequest, DisplaySource, InputDevice, TrackEvent, TrackInfo};
use crate::traits::encoder::MediaEncoder;

/// Observer for asynchronous track-level events (mute/unmute/ended).
///
/// May fire on a host-internal thread for the remainder of the session.
pub type TrackObserver = Arc<dyn Fn(&TrackEvent) + Send + Sync>;

/// Mixing graph lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    Suspended,
    Running,
    Closed,
}

impl GraphState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suspended => "suspended",
            Self::Running => "running",
            Self::Closed => "closed",
        }
    }
}

/// A live media stream handle, exclusively owned by the session that
/// acquired it.
pub trait MediaStream: Send {
    fn id(&self) -> &str;

    fn audio_tracks(&self) -> Vec<TrackInfo>;

    fn video_tracks(&self) -> Vec<TrackInfo>;

    /// Register an observer for later track events. Observers fan out.
    fn observe(&self, observer: TrackObserver);

    /// Stop every track and release the underlying device. Idempotent.
    fn stop(&mut self);
}

impl std::fmt::Debug for dyn MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream").field("id", &self.id()).finish()
    }
}

/// Host audio-processing graph summing connected sources into one mix
/// destination. No gain, panning, or filtering.
pub trait AudioGraph: Send {
    fn sample_rate(&self) -> u32;

    fn state(&self) -> GraphState;

    fn resume(&mut self) -> Result<(), SessionError>;

    /// Connect a source node derived from `stream` into the mix destination.
    fn connect_source(&mut self, stream: &dyn MediaStream) -> Result<(), SessionError>;

    /// The mix destination's output stream.
    fn mixed_stream(&mut self) -> Result<Box<dyn MediaStream>, SessionError>;

    /// Tear the graph down. Idempotent.
    fn close(&mut self);
}

/// The host capture surface the engine sequences: device enumeration,
/// user-media and display acquisition, the audio graph, and the chunked
/// encoder.
pub trait MediaHost: Send + Sync {
    /// List selectable audio-input devices.
    fn enumerate_inputs(&self) -> Result<Vec<InputDevice>, SessionError>;

    /// Acquire a microphone stream, constrained to `device_id` when given.
    fn acquire_microphone(
        &self,
        device_id: Option<&str>,
    ) -> Result<Box<dyn MediaStream>, SessionError>;

    /// List capturable screens.
    fn display_sources(&self) -> Result<Vec<DisplaySource>, SessionError>;

    /// Acquire a display capture stream carrying loopback audio.
    fn acquire_display(
        &self,
        request: &DisplayRequest,
    ) -> Result<Box<dyn MediaStream>, SessionError>;

    /// Create an audio-processing graph at the given sample rate.
    fn create_graph(&self, sample_rate: u32) -> Result<Box<dyn AudioGraph>, SessionError>;

    /// Whether the host can encode `mime_type`.
    fn supports_mime(&self, mime_type: &str) -> bool;

    /// Create a chunked encoder for `stream`, or `UnsupportedFormat`.
    fn create_encoder(
        &self,
        stream: &dyn MediaStream,
        mime_type: &str,
    ) -> Result<Box<dyn MediaEncoder>, SessionError>;
}
