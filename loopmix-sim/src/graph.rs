//! Simulated summing graph.

use serde_json::json;
use uuid::Uuid;

use loopmix_core::{
    AudioGraph, GraphState, MediaStream, ReadyState, SessionError, TrackInfo, TrackKind,
};

use crate::stream::{SimStream, StreamCounters};

pub struct SimGraph {
    sample_rate: u32,
    state: GraphState,
    sources: Vec<String>,
    counters: StreamCounters,
}

impl SimGraph {
    pub fn new(sample_rate: u32, counters: StreamCounters) -> Self {
        Self {
            sample_rate,
            state: GraphState::Suspended,
            sources: Vec::new(),
            counters,
        }
    }
}

impl AudioGraph for SimGraph {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn state(&self) -> GraphState {
        self.state
    }

    fn resume(&mut self) -> Result<(), SessionError> {
        if self.state == GraphState::Closed {
            return Err(SessionError::GraphFailure("graph is closed".into()));
        }
        self.state = GraphState::Running;
        Ok(())
    }

    fn connect_source(&mut self, stream: &dyn MediaStream) -> Result<(), SessionError> {
        if self.state != GraphState::Running {
            return Err(SessionError::GraphFailure(format!(
                "cannot connect while graph is {}",
                self.state.as_str()
            )));
        }
        if stream.audio_tracks().is_empty() {
            return Err(SessionError::GraphFailure(format!(
                "stream {} carries no audio track",
                stream.id()
            )));
        }
        self.sources.push(stream.id().to_string());
        Ok(())
    }

    fn mixed_stream(&mut self) -> Result<Box<dyn MediaStream>, SessionError> {
        if self.state != GraphState::Running {
            return Err(SessionError::GraphFailure(format!(
                "cannot mix while graph is {}",
                self.state.as_str()
            )));
        }
        if self.sources.is_empty() {
            return Err(SessionError::GraphFailure("no sources connected".into()));
        }
        let track = TrackInfo {
            id: format!("mix-track-{}", Uuid::new_v4()),
            kind: TrackKind::Audio,
            label: "Mix destination".into(),
            enabled: true,
            muted: false,
            ready_state: ReadyState::Live,
            settings: json!({
                "sampleRate": self.sample_rate,
                "channelCount": 2,
                "sources": self.sources,
            }),
        };
        Ok(Box::new(SimStream::new(
            format!("sim-mixed-{}", Uuid::new_v4()),
            vec![track],
            self.counters.clone(),
        )))
    }

    fn close(&mut self) {
        self.state = GraphState::Closed;
    }
}
