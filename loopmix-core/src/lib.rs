//! Core engine for capture-record-loop audio sessions.
//!
//! A session acquires a microphone stream and a system-audio loopback
//! stream, sums them through a host audio graph, records the mix for a
//! fixed window, then loops the finalized recording through a playback
//! sink until stopped or restarted.
//!
//! ```text
//!   MediaHost (platform seam)
//!     |-- acquire::microphone ----+
//!     |-- acquire::system_audio --+--> mixer::mix_streams --> AudioGraph
//!     |                                                          |
//!     |                                                   mixed MediaStream
//!     |                                                          |
//!     +-- create_encoder ---------------------------------> ChunkRecorder
//!                                                                |
//!                                                      FinalizedRecording
//!                                                                |
//!   LoopController -------------------------------------> PlaybackSink
//! ```
//!
//! Lifecycle phases:
//!
//! ```text
//!   Idle -> Acquiring -> Recording -> Finalizing -> Looping -> Idle
//!              |             |                         |
//!              |         (stop) -> Canceled -> Idle  (start) -> Acquiring
//!              +-> Failed(e) -> Idle
//! ```
//!
//! Platform backends implement the traits in [`traits`]; the engine itself
//! is host-agnostic.

pub mod capture;
pub mod models;
pub mod report;
pub mod session;
pub mod traits;

pub use capture::mixer::MixedOutput;
pub use capture::recorder::ChunkRecorder;
pub use models::config::{
    SessionConfig, SourceSelector, DEFAULT_RECORDING_MS, DEFAULT_SAMPLE_RATE, PREFERRED_MIME_TYPE,
};
pub use models::error::SessionError;
pub use models::media::{
    DisplayRequest, DisplaySource, InputDevice, ReadyState, TrackEvent, TrackEventKind, TrackInfo,
    TrackKind,
};
pub use models::recording::{FinalizedRecording, RecordingInfo};
pub use models::state::{RecorderState, SessionPhase, StatusKind, StatusSlot, StatusView};
pub use report::StatusReporter;
pub use session::controller::LoopController;
pub use traits::bridge::{BridgeLog, Capability, PermissionProbe, PermissionStatus};
pub use traits::delegate::SessionDelegate;
pub use traits::encoder::{EncoderCallback, EncoderEvent, MediaEncoder};
pub use traits::media_host::{AudioGraph, GraphState, MediaHost, MediaStream, TrackObserver};
pub use traits::playback::PlaybackSink;
