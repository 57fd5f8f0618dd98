use super::error::SessionError;

/// Session lifecycle state machine.
///
/// State transitions:
/// ```text
/// idle → acquiring → recording → finalizing → looping
///            ↓           ↓            ↓          ↓
///         failed      (cancel)    canceled → idle (stop)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Acquiring,
    Recording,
    Finalizing,
    Looping,
    Canceled,
    Failed(SessionError),
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a session currently holds capture resources.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Acquiring | Self::Recording | Self::Finalizing)
    }

    pub fn is_looping(&self) -> bool {
        matches!(self, Self::Looping)
    }
}

/// Recorder state machine.
///
/// ```text
/// idle → recording → stopping → finalized
///             ↓           ↓
///          (cancel) → canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Stopping,
    Finalized,
    Canceled,
}

impl RecorderState {
    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::Canceled)
    }
}

/// Which status slot a status update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Capture,
    Playback,
}

/// One user-visible status slot: latest text plus a connected indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlot {
    pub text: String,
    pub connected: bool,
}

impl StatusSlot {
    pub fn new(text: impl Into<String>, connected: bool) -> Self {
        Self {
            text: text.into(),
            connected,
        }
    }
}

/// The two independent status slots shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub capture: StatusSlot,
    pub playback: StatusSlot,
}

impl Default for StatusView {
    fn default() -> Self {
        Self {
            capture: StatusSlot::new("Capture: Idle", false),
            playback: StatusSlot::new("Playback: Stopped", false),
        }
    }
}
