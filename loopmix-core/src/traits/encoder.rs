use std::sync::Arc;

use crate::models::error::SessionError;

/// Event delivered by a running encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    /// A bounded binary fragment. May be empty.
    Chunk(Vec<u8>),
    /// The encoder flushed its last data and halted.
    Stopped,
    /// A runtime fault. Does not imply the encoder stopped.
    Error(String),
}

/// Callback invoked for every encoder event.
///
/// May fire on a dedicated encoder thread — keep processing minimal.
pub type EncoderCallback = Arc<dyn Fn(EncoderEvent) + Send + Sync>;

/// Chunked media encoder attached to one stream.
pub trait MediaEncoder: Send {
    /// The negotiated MIME type, fixed at creation.
    fn mime_type(&self) -> &str;

    /// Start producing chunks through `callback`.
    fn start(&mut self, callback: EncoderCallback) -> Result<(), SessionError>;

    /// Flush pending data through the callback, emit `Stopped`, and halt.
    ///
    /// Every remaining chunk must be delivered before this returns.
    fn stop(&mut self) -> Result<(), SessionError>;
}
