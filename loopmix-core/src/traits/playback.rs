use crate::models::error::SessionError;
use crate::models::recording::FinalizedRecording;

/// Playback sink for the finalized recording.
pub trait PlaybackSink: Send {
    /// Load a recording, replacing whatever was loaded before.
    fn load(&mut self, recording: FinalizedRecording);

    fn set_looping(&mut self, looping: bool);

    /// Begin playback. Hosts with an autoplay policy may refuse with
    /// `SessionError::AutoplayBlocked`; the loaded loop stays armed and a
    /// later manual trigger can still start it.
    fn play(&mut self) -> Result<(), SessionError>;

    fn pause(&mut self);

    fn is_playing(&self) -> bool;
}
