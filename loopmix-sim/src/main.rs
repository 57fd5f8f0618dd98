//! Demo: run one capture-record-loop session against the simulated host.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use loopmix_core::{
    BridgeLog, FinalizedRecording, LoopController, PermissionProbe, SessionConfig,
    SessionDelegate, SessionError, SessionPhase, StatusKind, StatusReporter,
};
use loopmix_sim::{SimHost, SimPermissions, SimPlayback, StdoutBridge};

/// Prints lifecycle transitions; diagnostic lines already reach the log
/// through the bridge.
struct ConsoleDelegate;

impl SessionDelegate for ConsoleDelegate {
    fn on_phase_changed(&self, phase: &SessionPhase) {
        log::info!("phase: {phase:?}");
    }

    fn on_status_changed(&self, kind: StatusKind, text: &str, connected: bool) {
        log::info!("status[{kind:?}]: {text} (connected={connected})");
    }

    fn on_log(&self, _line: &str) {}

    fn on_recording_finalized(&self, recording: &FinalizedRecording) {
        log::info!(
            "finalized: {} bytes across {} chunks ({})",
            recording.size(),
            recording.chunk_count,
            recording.mime_type
        );
    }

    fn on_error(&self, error: &SessionError) {
        log::warn!("session error: {error}");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let host = SimHost::new();
    let (sink, monitor) = SimPlayback::new();
    let bridge: Arc<dyn BridgeLog> = Arc::new(StdoutBridge);
    let delegate: Arc<dyn SessionDelegate> = Arc::new(ConsoleDelegate);
    let reporter = StatusReporter::new(Some(bridge), Some(delegate));

    let config = SessionConfig {
        recording_ms: 2_000,
        ..SessionConfig::default()
    };

    let controller = match LoopController::new(host, sink, config, reporter) {
        Ok(controller) => controller,
        Err(error) => {
            log::error!("invalid configuration: {error}");
            std::process::exit(1);
        }
    };
    let probe: Arc<dyn PermissionProbe> = Arc::new(SimPermissions::default());
    controller.set_permission_probe(probe);

    match controller.microphones() {
        Ok(devices) => {
            for device in devices {
                log::info!("input device: {} ({})", device.label, device.id);
            }
        }
        Err(error) => log::warn!("device enumeration failed: {error}"),
    }

    if let Err(error) = controller.start() {
        log::error!("session failed: {error}");
        std::process::exit(1);
    }

    // Let the window elapse and the loop spin briefly.
    thread::sleep(Duration::from_millis(3_000));

    log::info!(
        "phase={:?} playing={} loop_bytes={}",
        controller.phase(),
        monitor.is_playing(),
        monitor.loaded().map(|r| r.size()).unwrap_or(0)
    );

    controller.stop();
    log::info!("done");
}
