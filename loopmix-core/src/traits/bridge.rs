use serde_json::Value;

/// Capability whose permission status can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Microphone,
    DisplayCapture,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
            Self::DisplayCapture => "display-capture",
        }
    }
}

/// Host-reported permission status. Consumed only for diagnostics; never
/// gates session logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Unknown,
    Error,
}

impl PermissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

/// One-way log sink into the host process.
pub trait BridgeLog: Send + Sync {
    fn log(&self, message: &str, meta: Option<&Value>);
}

/// Permission-status query into the host process.
pub trait PermissionProbe: Send + Sync {
    fn status(&self, capability: Capability) -> PermissionStatus;
}
