//! In-memory media streams with live-handle accounting.

use std::sync::Arc;

use parking_lot::Mutex;

use loopmix_core::{
    MediaStream, TrackEvent, TrackEventKind, TrackInfo, TrackKind, TrackObserver,
};

/// Counts live stream handles across a host. Every acquired stream
/// increments the count; stopping it decrements exactly once.
#[derive(Clone, Default)]
pub struct StreamCounters {
    live: Arc<Mutex<usize>>,
}

impl StreamCounters {
    pub fn live_streams(&self) -> usize {
        *self.live.lock()
    }

    fn acquire(&self) {
        *self.live.lock() += 1;
    }

    fn release(&self) {
        let mut live = self.live.lock();
        *live = live.saturating_sub(1);
    }
}

pub struct SimStream {
    id: String,
    tracks: Vec<TrackInfo>,
    observers: Arc<Mutex<Vec<TrackObserver>>>,
    counters: StreamCounters,
    stopped: bool,
}

impl SimStream {
    pub fn new(id: impl Into<String>, tracks: Vec<TrackInfo>, counters: StreamCounters) -> Self {
        counters.acquire();
        Self {
            id: id.into(),
            tracks,
            observers: Arc::new(Mutex::new(Vec::new())),
            counters,
            stopped: false,
        }
    }

    /// Deliver a track event to every registered observer.
    pub fn emit(&self, event: &TrackEvent) {
        for observer in self.observers.lock().iter() {
            observer(event);
        }
    }
}

impl MediaStream for SimStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn audio_tracks(&self) -> Vec<TrackInfo> {
        self.tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Audio)
            .cloned()
            .collect()
    }

    fn video_tracks(&self) -> Vec<TrackInfo> {
        self.tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Video)
            .cloned()
            .collect()
    }

    fn observe(&self, observer: TrackObserver) {
        self.observers.lock().push(observer);
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            for track in &self.tracks {
                self.emit(&TrackEvent {
                    track_id: track.id.clone(),
                    kind: TrackEventKind::Ended,
                });
            }
            self.counters.release();
        }
    }
}

impl Drop for SimStream {
    fn drop(&mut self) {
        self.stop();
    }
}
