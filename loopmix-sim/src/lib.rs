//! Simulated backend for the loopmix engine.
//!
//! Implements every host-facing trait in-process with deterministic
//! behavior: tone-generating encoder, live-handle accounting, optional
//! autoplay policy, and a host that rejects audio-only display capture by
//! default so sessions exercise the video-enabled fallback.

pub mod bridge;
pub mod encoder;
pub mod graph;
pub mod host;
pub mod playback;
pub mod stream;
pub mod tone;

pub use bridge::{SimPermissions, StdoutBridge};
pub use encoder::SimEncoder;
pub use graph::SimGraph;
pub use host::SimHost;
pub use playback::{PlaybackMonitor, SimPlayback};
pub use stream::{SimStream, StreamCounters};
