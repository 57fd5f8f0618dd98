use thiserror::Error;

/// Errors surfaced by the capture-record-loop engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no matching microphone: {0}")]
    DeviceUnavailable(String),

    #[error("system audio loopback unavailable: {0}")]
    LoopbackUnavailable(String),

    #[error("unsupported recording format: {0}")]
    UnsupportedFormat(String),

    #[error("autoplay blocked: {0}")]
    AutoplayBlocked(String),

    #[error("encoder failure: {0}")]
    EncoderFailure(String),

    #[error("audio graph failure: {0}")]
    GraphFailure(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
