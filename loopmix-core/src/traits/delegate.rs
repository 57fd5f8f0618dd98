use crate::models::error::SessionError;
use crate::models::recording::FinalizedRecording;
use crate::models::state::{SessionPhase, StatusKind};

/// Event delegate for session notifications.
///
/// Methods may be called from the deadline thread, not the UI thread.
/// Implementations should marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called on every lifecycle transition.
    fn on_phase_changed(&self, phase: &SessionPhase);

    /// Called when a status slot changes.
    fn on_status_changed(&self, kind: StatusKind, text: &str, connected: bool);

    /// Called for every diagnostic line, already clock-stamped.
    fn on_log(&self, line: &str);

    /// Called when a recording is finalized and about to be looped.
    fn on_recording_finalized(&self, recording: &FinalizedRecording);

    /// Called when a session aborts with an error.
    fn on_error(&self, error: &SessionError);
}
