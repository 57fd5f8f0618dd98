//! Diagnostics fan-out: clock-stamped log lines to the `log` facade, the
//! host-process bridge, and the session delegate.

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;

use crate::models::error::SessionError;
use crate::models::media::{TrackEvent, TrackInfo};
use crate::models::recording::FinalizedRecording;
use crate::models::state::{SessionPhase, StatusKind};
use crate::traits::bridge::{BridgeLog, Capability, PermissionProbe};
use crate::traits::delegate::SessionDelegate;
use crate::traits::media_host::TrackObserver;

/// Cheaply cloneable reporter shared with encoder callbacks and the
/// deadline thread.
#[derive(Clone, Default)]
pub struct StatusReporter {
    inner: Arc<ReporterInner>,
}

#[derive(Default)]
struct ReporterInner {
    bridge: Option<Arc<dyn BridgeLog>>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl StatusReporter {
    pub fn new(
        bridge: Option<Arc<dyn BridgeLog>>,
        delegate: Option<Arc<dyn SessionDelegate>>,
    ) -> Self {
        Self {
            inner: Arc::new(ReporterInner { bridge, delegate }),
        }
    }

    /// Emit one diagnostic line.
    pub fn log(&self, message: impl AsRef<str>) {
        self.emit(message.as_ref(), None);
    }

    /// Emit one diagnostic line with structured metadata for the bridge.
    pub fn log_meta(&self, message: impl AsRef<str>, meta: Value) {
        self.emit(message.as_ref(), Some(&meta));
    }

    fn emit(&self, message: &str, meta: Option<&Value>) {
        log::debug!(target: "loopmix", "{message}");
        if let Some(bridge) = &self.inner.bridge {
            bridge.log(message, meta);
        }
        if let Some(delegate) = &self.inner.delegate {
            let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
            delegate.on_log(&line);
        }
    }

    pub(crate) fn phase(&self, phase: &SessionPhase) {
        if let Some(delegate) = &self.inner.delegate {
            delegate.on_phase_changed(phase);
        }
    }

    pub(crate) fn status(&self, kind: StatusKind, text: &str, connected: bool) {
        if let Some(delegate) = &self.inner.delegate {
            delegate.on_status_changed(kind, text, connected);
        }
    }

    pub(crate) fn error(&self, error: &SessionError) {
        if let Some(delegate) = &self.inner.delegate {
            delegate.on_error(error);
        }
    }

    pub(crate) fn finalized(&self, recording: &FinalizedRecording) {
        if let Some(delegate) = &self.inner.delegate {
            delegate.on_recording_finalized(recording);
        }
    }

    /// Log one track's snapshot: kind, id, label, flags, then settings.
    pub fn track_details(&self, prefix: &str, track: Option<&TrackInfo>) {
        let Some(track) = track else {
            self.log(format!("{prefix}: no track"));
            return;
        };
        self.log(format!(
            "{prefix}: kind={}, id={}, label=\"{}\", enabled={}, muted={}, readyState={}",
            track.kind.as_str(),
            track.id,
            track.label,
            track.enabled,
            track.muted,
            track.ready_state.as_str(),
        ));
        self.log_meta(
            format!("{prefix} settings: {}", track.settings),
            track.settings.clone(),
        );
    }

    /// Build an observer that logs mute/unmute/ended events for a stream's
    /// tracks for the remainder of the session.
    pub fn track_observer(&self, prefix: &str) -> TrackObserver {
        let reporter = self.clone();
        let prefix = prefix.to_string();
        Arc::new(move |event: &TrackEvent| {
            reporter.log(format!(
                "{prefix}: {} (track {})",
                event.kind.as_str(),
                event.track_id
            ));
        })
    }

    /// Log host permission statuses. Diagnostics only, never gating.
    pub fn permission_snapshot(&self, probe: &dyn PermissionProbe) {
        for capability in [Capability::Microphone, Capability::DisplayCapture] {
            self.log(format!(
                "Permission {}: {}",
                capability.as_str(),
                probe.status(capability).as_str()
            ));
        }
    }
}
