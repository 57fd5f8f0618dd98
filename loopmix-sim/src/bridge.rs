//! Host-process logging bridge and permission probe.

use serde_json::Value;

use loopmix_core::{BridgeLog, Capability, PermissionProbe, PermissionStatus};

/// Forwards engine diagnostics to the process log under the `bridge`
/// target, mirroring how an embedding shell would surface them.
#[derive(Default)]
pub struct StdoutBridge;

impl BridgeLog for StdoutBridge {
    fn log(&self, message: &str, meta: Option<&Value>) {
        match meta {
            Some(meta) => log::info!(target: "bridge", "{message} {meta}"),
            None => log::info!(target: "bridge", "{message}"),
        }
    }
}

/// Static permission answers.
pub struct SimPermissions {
    pub microphone: PermissionStatus,
    pub display_capture: PermissionStatus,
}

impl Default for SimPermissions {
    fn default() -> Self {
        Self {
            microphone: PermissionStatus::Granted,
            display_capture: PermissionStatus::Granted,
        }
    }
}

impl PermissionProbe for SimPermissions {
    fn status(&self, capability: Capability) -> PermissionStatus {
        match capability {
            Capability::Microphone => self.microphone,
            Capability::DisplayCapture => self.display_capture,
        }
    }
}
