use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a host media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// Liveness of a host media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Live,
    Ended,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Ended => "ended",
        }
    }
}

/// Snapshot of a host media track at observation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub kind: TrackKind,
    pub label: String,
    pub enabled: bool,
    pub muted: bool,
    pub ready_state: ReadyState,
    /// Host-reported settings (sample rate, channel count, ...), opaque JSON.
    pub settings: Value,
}

/// Asynchronous track-level notification delivered after acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    pub track_id: String,
    pub kind: TrackEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEventKind {
    Muted,
    Unmuted,
    Ended,
}

impl TrackEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Muted => "muted",
            Self::Unmuted => "unmuted",
            Self::Ended => "ended",
        }
    }
}

/// A selectable audio-input device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDevice {
    pub id: String,
    pub label: String,
    pub is_default: bool,
}

/// A capturable screen reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySource {
    pub id: String,
    pub name: String,
}

/// Request for a display/loopback capture stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    pub source_id: String,
    pub audio: bool,
    pub video: bool,
}
