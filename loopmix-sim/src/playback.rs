//! Simulated playback sink with an optional autoplay policy.

use std::sync::Arc;

use parking_lot::Mutex;

use loopmix_core::{FinalizedRecording, PlaybackSink, SessionError};

#[derive(Default)]
struct PlayerState {
    loaded: Option<FinalizedRecording>,
    looping: bool,
    playing: bool,
    require_gesture: bool,
    gesture_seen: bool,
}

/// Shared view of the sink, for UIs and tests.
#[derive(Clone, Default)]
pub struct PlaybackMonitor {
    inner: Arc<Mutex<PlayerState>>,
}

impl PlaybackMonitor {
    pub fn is_playing(&self) -> bool {
        self.inner.lock().playing
    }

    pub fn is_looping(&self) -> bool {
        self.inner.lock().looping
    }

    pub fn loaded(&self) -> Option<FinalizedRecording> {
        self.inner.lock().loaded.clone()
    }

    /// Simulate a user gesture. If a loop is armed, it starts playing.
    pub fn user_gesture(&self) {
        let mut state = self.inner.lock();
        state.gesture_seen = true;
        if state.loaded.is_some() {
            state.playing = true;
        }
    }
}

pub struct SimPlayback {
    monitor: PlaybackMonitor,
}

impl SimPlayback {
    pub fn new() -> (Self, PlaybackMonitor) {
        Self::with_autoplay_policy(false)
    }

    /// With `require_gesture` set, `play` refuses until a user gesture has
    /// been observed, like a browser autoplay policy.
    pub fn with_autoplay_policy(require_gesture: bool) -> (Self, PlaybackMonitor) {
        let monitor = PlaybackMonitor::default();
        monitor.inner.lock().require_gesture = require_gesture;
        (
            Self {
                monitor: monitor.clone(),
            },
            monitor,
        )
    }
}

impl PlaybackSink for SimPlayback {
    fn load(&mut self, recording: FinalizedRecording) {
        self.monitor.inner.lock().loaded = Some(recording);
    }

    fn set_looping(&mut self, looping: bool) {
        self.monitor.inner.lock().looping = looping;
    }

    fn play(&mut self) -> Result<(), SessionError> {
        let mut state = self.monitor.inner.lock();
        if state.loaded.is_none() {
            return Err(SessionError::Unknown("nothing loaded".into()));
        }
        if state.require_gesture && !state.gesture_seen {
            return Err(SessionError::AutoplayBlocked(
                "user gesture required".into(),
            ));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.monitor.inner.lock().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.monitor.is_playing()
    }
}
