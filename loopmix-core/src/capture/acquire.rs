//! Stream acquisition: microphone input and display loopback audio.

use crate::models::config::SourceSelector;
use crate::models::error::SessionError;
use crate::models::media::{DisplayRequest, ReadyState};
use crate::report::StatusReporter;
use crate::traits::media_host::{MediaHost, MediaStream};

/// Acquire a microphone stream, constrained to `device_id` when given, else
/// any default device. Logs the stream, its first track, and registers
/// track-event observers.
pub fn microphone<H: MediaHost + ?Sized>(
    host: &H,
    reporter: &StatusReporter,
    device_id: Option<&str>,
) -> Result<Box<dyn MediaStream>, SessionError> {
    let stream = host.acquire_microphone(device_id).map_err(|error| match error {
        SessionError::DeviceUnavailable(_) => error,
        other => SessionError::DeviceUnavailable(other.to_string()),
    })?;

    let tracks = stream.audio_tracks();
    reporter.log(format!(
        "Microphone stream id={}, audioTracks={}",
        stream.id(),
        tracks.len()
    ));
    reporter.track_details("Mic track", tracks.first());
    stream.observe(reporter.track_observer("Mic track"));
    Ok(stream)
}

/// Acquire display loopback audio.
///
/// Attempts audio-only capture first; on any host rejection retries with
/// video enabled, since some hosts only deliver loopback audio alongside a
/// live video track. The video track is kept alive but its content is
/// ignored. The obtained system-audio track must exist and be live; a muted
/// but live track is accepted.
pub fn system_audio<H: MediaHost + ?Sized>(
    host: &H,
    reporter: &StatusReporter,
    selector: &SourceSelector,
) -> Result<Box<dyn MediaStream>, SessionError> {
    let sources = host.display_sources()?;
    let source = selector.select(&sources).ok_or_else(|| {
        SessionError::LoopbackUnavailable("no display source matches the selection policy".into())
    })?;

    let audio_only = DisplayRequest {
        source_id: source.id.clone(),
        audio: true,
        video: false,
    };
    let mut stream = match host.acquire_display(&audio_only) {
        Ok(stream) => {
            reporter.log("Display capture mode: audio-only (video=false).");
            stream
        }
        Err(error) => {
            reporter.log(format!(
                "Audio-only display capture failed ({error}). Falling back to video=true."
            ));
            let with_video = DisplayRequest {
                source_id: source.id.clone(),
                audio: true,
                video: true,
            };
            let stream = host.acquire_display(&with_video).map_err(|error| match error {
                SessionError::LoopbackUnavailable(_) => error,
                other => SessionError::LoopbackUnavailable(other.to_string()),
            })?;
            reporter.log("Display capture mode: audio+video fallback (video=true).");
            stream
        }
    };

    let audio_tracks = stream.audio_tracks();
    let video_tracks = stream.video_tracks();
    reporter.log(format!(
        "Display stream id={}, videoTracks={}, audioTracks={}",
        stream.id(),
        video_tracks.len(),
        audio_tracks.len()
    ));
    reporter.track_details("Display audio track", audio_tracks.first());
    reporter.track_details("Display video track", video_tracks.first());

    // Liveness is decided by readyState alone.
    let live = audio_tracks
        .first()
        .map(|track| track.ready_state == ReadyState::Live)
        .unwrap_or(false);
    if !live {
        stream.stop();
        return Err(SessionError::LoopbackUnavailable(
            "system audio track is missing or not live".into(),
        ));
    }

    stream.observe(reporter.track_observer("Display track"));
    Ok(stream)
}
