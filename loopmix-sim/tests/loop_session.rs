//! Full-stack session tests against the simulated host.

use std::time::{Duration, Instant};

use loopmix_core::{LoopController, SessionConfig, SessionPhase, StatusReporter};
use loopmix_sim::{SimHost, SimPlayback};

fn wait_until(mut pred: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if pred() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    pred()
}

fn short_config() -> SessionConfig {
    SessionConfig {
        recording_ms: 200,
        ..SessionConfig::default()
    }
}

#[test]
fn session_records_tone_and_loops_it() {
    let host = SimHost::new();
    let (sink, monitor) = SimPlayback::new();
    let controller =
        LoopController::new(host, sink, short_config(), StatusReporter::default()).unwrap();

    controller.start().unwrap();
    assert!(wait_until(
        || controller.phase() == SessionPhase::Looping,
        Duration::from_secs(5),
    ));

    let recording = controller.last_recording().unwrap();
    assert!(recording.size() > 0);
    assert_eq!(recording.mime_type, "audio/webm;codecs=opus");

    assert!(monitor.is_playing());
    assert!(monitor.is_looping());
    assert_eq!(monitor.loaded().unwrap().id, recording.id);
}

#[test]
fn stop_discards_the_recording_in_progress() {
    let host = SimHost::new();
    let (sink, monitor) = SimPlayback::new();
    let controller = LoopController::new(
        host,
        sink,
        SessionConfig {
            recording_ms: 10_000,
            ..SessionConfig::default()
        },
        StatusReporter::default(),
    )
    .unwrap();

    controller.start().unwrap();
    assert_eq!(controller.phase(), SessionPhase::Recording);

    controller.stop();
    assert_eq!(controller.phase(), SessionPhase::Idle);
    assert!(controller.last_recording().is_none());
    assert!(!monitor.is_playing());
    assert!(monitor.loaded().is_none());
}

#[test]
fn autoplay_policy_leaves_loop_armed_until_gesture() {
    let host = SimHost::new();
    let (sink, monitor) = SimPlayback::with_autoplay_policy(true);
    let controller =
        LoopController::new(host, sink, short_config(), StatusReporter::default()).unwrap();

    controller.start().unwrap();
    assert!(wait_until(
        || controller.phase() == SessionPhase::Looping,
        Duration::from_secs(5),
    ));

    assert!(!monitor.is_playing());
    assert!(monitor.is_looping());
    assert!(monitor.loaded().is_some());

    monitor.user_gesture();
    assert!(monitor.is_playing());
}

#[test]
fn audio_only_host_skips_the_video_fallback() {
    let host = SimHost::new().with_audio_only_display(true);
    let (sink, _monitor) = SimPlayback::new();
    let controller =
        LoopController::new(host, sink, short_config(), StatusReporter::default()).unwrap();

    controller.start().unwrap();
    assert!(wait_until(
        || controller.phase() == SessionPhase::Looping,
        Duration::from_secs(5),
    ));
}

#[test]
fn restart_replaces_the_armed_loop() {
    let host = SimHost::new();
    let (sink, monitor) = SimPlayback::new();
    let controller =
        LoopController::new(host, sink, short_config(), StatusReporter::default()).unwrap();

    controller.start().unwrap();
    assert!(wait_until(
        || controller.phase() == SessionPhase::Looping,
        Duration::from_secs(5),
    ));
    let first = controller.last_recording().unwrap();

    controller.start().unwrap();
    assert!(wait_until(
        || {
            controller.phase() == SessionPhase::Looping
                && controller
                    .last_recording()
                    .map(|r| r.id != first.id)
                    .unwrap_or(false)
        },
        Duration::from_secs(5),
    ));
    assert_eq!(monitor.loaded().unwrap().id, controller.last_recording().unwrap().id);
}
