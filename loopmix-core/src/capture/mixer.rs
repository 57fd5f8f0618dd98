//! Mixed-stream construction through the host audio graph.

use crate::models::error::SessionError;
use crate::report::StatusReporter;
use crate::traits::media_host::{AudioGraph, MediaHost, MediaStream};

/// A graph and the mixed output it produces.
///
/// The graph is exclusively owned by the session and must be closed when the
/// session ends, on every exit path.
pub struct MixedOutput {
    pub graph: Box<dyn AudioGraph>,
    pub stream: Box<dyn MediaStream>,
}

impl std::fmt::Debug for MixedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixedOutput")
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

/// Sum two input streams into one mixed output: one graph, one mix
/// destination, one source node per input.
pub fn mix_streams<H: MediaHost + ?Sized>(
    host: &H,
    reporter: &StatusReporter,
    sample_rate: u32,
    mic: &dyn MediaStream,
    system: &dyn MediaStream,
) -> Result<MixedOutput, SessionError> {
    let mut graph = host.create_graph(sample_rate)?;

    if let Err(error) = graph.resume() {
        graph.close();
        return Err(error);
    }
    reporter.log(format!(
        "Audio graph state={}, sampleRate={}",
        graph.state().as_str(),
        graph.sample_rate()
    ));

    if let Err(error) = graph.connect_source(mic) {
        graph.close();
        return Err(error);
    }
    if let Err(error) = graph.connect_source(system) {
        graph.close();
        return Err(error);
    }
    reporter.log("Capturing microphone + system audio.");

    let stream = match graph.mixed_stream() {
        Ok(stream) => stream,
        Err(error) => {
            graph.close();
            return Err(error);
        }
    };
    let audio_tracks = stream.audio_tracks();
    reporter.log(format!(
        "Mixed stream id={}, audioTracks={}",
        stream.id(),
        audio_tracks.len()
    ));
    reporter.track_details("Mixed track", audio_tracks.first());

    Ok(MixedOutput { graph, stream })
}
